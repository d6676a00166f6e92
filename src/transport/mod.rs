//! Upload transports
//!
//! A transport takes one encoded file and submits it to a destination. The
//! implementations are:
//!
//! - [`DocumentStoreTransport`]: posts to the external document store upload action
//! - [`LocalDocumentStore`]: simulated document store for local runs and tests
//! - [`AttachmentTransport`]: creates inline attachment records through the host
//! - [`Router`]: dispatches on the [`Destination`] variant to one of the above

mod attachment;
mod document_store;
mod local;

pub use attachment::{AttachmentTransport, attachment_record};
pub use document_store::{DocumentStoreTransport, upload_document_payload};
pub use local::LocalDocumentStore;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Result, TransportError};
use crate::types::{Destination, FileDescriptor, ParentContext};

/// Submission strategy for one file
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Submit `descriptor` to `destination` on behalf of `parent`
    ///
    /// # Errors
    ///
    /// Returns an error when the remote side does not accept the file. The
    /// driver treats any error as fatal for the rest of the batch.
    async fn submit(
        &self,
        descriptor: &FileDescriptor,
        destination: &Destination,
        parent: &ParentContext,
    ) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Dispatches each submission on the destination variant
#[derive(Clone, Default)]
pub struct Router {
    document_store: Option<Arc<dyn UploadTransport>>,
    attachment: Option<Arc<dyn UploadTransport>>,
}

impl Router {
    /// Create a router with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Route [`Destination::ExternalDocumentStore`] to `transport`
    pub fn with_document_store(mut self, transport: Arc<dyn UploadTransport>) -> Self {
        self.document_store = Some(transport);
        self
    }

    /// Route [`Destination::InlineAttachment`] to `transport`
    pub fn with_attachment(mut self, transport: Arc<dyn UploadTransport>) -> Self {
        self.attachment = Some(transport);
        self
    }

    fn route(&self, destination: &Destination) -> Option<&Arc<dyn UploadTransport>> {
        match destination {
            Destination::ExternalDocumentStore { .. } => self.document_store.as_ref(),
            Destination::InlineAttachment { .. } => self.attachment.as_ref(),
        }
    }
}

#[async_trait]
impl UploadTransport for Router {
    async fn submit(
        &self,
        descriptor: &FileDescriptor,
        destination: &Destination,
        parent: &ParentContext,
    ) -> Result<()> {
        let transport = self.route(destination).ok_or(TransportError::Unroutable {
            destination: destination.label(),
        })?;
        tracing::debug!(
            transport = transport.name(),
            name = descriptor.name(),
            "submitting file"
        );
        transport.submit(descriptor, destination, parent).await
    }

    fn name(&self) -> &'static str {
        "router"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::AttachmentKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl UploadTransport for Recorder {
        async fn submit(
            &self,
            descriptor: &FileDescriptor,
            _destination: &Destination,
            _parent: &ParentContext,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(descriptor.name().to_string());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    fn parent() -> ParentContext {
        ParentContext {
            entity_id: "1".into(),
            entity_name: "account".into(),
            entity_set_name: "accounts".into(),
        }
    }

    #[tokio::test]
    async fn routes_on_destination_variant() {
        let store = Arc::new(Recorder::default());
        let attachments = Arc::new(Recorder::default());
        let router = Router::new()
            .with_document_store(store.clone())
            .with_attachment(attachments.clone());
        let file = FileDescriptor::new("a.txt", "text/plain", "YQ==");

        router
            .submit(
                &file,
                &Destination::ExternalDocumentStore {
                    folder_path: String::new(),
                },
                &parent(),
            )
            .await
            .unwrap();
        router
            .submit(
                &file,
                &Destination::InlineAttachment {
                    kind: AttachmentKind::Generic,
                },
                &parent(),
            )
            .await
            .unwrap();

        assert_eq!(store.calls.lock().unwrap().len(), 1);
        assert_eq!(attachments.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_route_is_a_transport_error() {
        let router = Router::new().with_document_store(Arc::new(Recorder::default()));
        let file = FileDescriptor::new("a.txt", "", "YQ==");

        let result = router
            .submit(
                &file,
                &Destination::InlineAttachment {
                    kind: AttachmentKind::Activity,
                },
                &parent(),
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Unroutable { .. }))
        ));
    }
}
