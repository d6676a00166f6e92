//! Upload session driver split into focused submodules.
//!
//! - [`batch`] - Sequential processing of one drop event
//!
//! The `AttachmentUploader` struct below holds the injected collaborators and
//! the session counters; construction picks the transports once, so nothing
//! inside a batch branches on the environment.

mod batch;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use crate::config::{Config, Environment, TransportKind};
use crate::error::{Error, Result};
use crate::host::{HostContext, RecordService};
use crate::messages;
use crate::session::SessionTracker;
use crate::transport::{
    AttachmentTransport, DocumentStoreTransport, LocalDocumentStore, Router, UploadTransport,
};
use crate::types::{Event, RecordProps, UploadSession};

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Batch upload orchestrator for one widget instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct AttachmentUploader {
    /// Configuration (wrapped in Arc for sharing across clones)
    pub(crate) config: Arc<Config>,
    /// Hosting record form
    pub(crate) host: Arc<dyn HostContext>,
    /// Submission strategy, usually a [`Router`]
    pub(crate) transport: Arc<dyn UploadTransport>,
    /// Progress counters of the active batch
    pub(crate) session: Arc<SessionTracker>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
}

impl AttachmentUploader {
    /// Create an uploader with the transports implied by `config`
    ///
    /// Inline attachments always go through `records`. The document store is
    /// simulated in [`Environment::Local`]; otherwise it posts to the host's
    /// client URL and is only set up when it is the active transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is invalid or the
    /// document store is active but the host provides no client URL.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attachment_uploader::{AttachmentUploader, Config, HostContext, RecordService};
    /// use std::sync::Arc;
    ///
    /// # fn example(
    /// #     host: Arc<dyn HostContext>,
    /// #     records: Arc<dyn RecordService>,
    /// # ) -> attachment_uploader::Result<()> {
    /// let uploader = AttachmentUploader::new(Config::default(), host, records)?;
    /// assert!(!uploader.session().is_active());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        config: Config,
        host: Arc<dyn HostContext>,
        records: Arc<dyn RecordService>,
    ) -> Result<Self> {
        config.validate()?;

        let mut router = Router::new().with_attachment(Arc::new(AttachmentTransport::new(records)));
        if let Some(store) = document_store_transport(&config, host.as_ref())? {
            router = router.with_document_store(store);
        }

        Self::with_transport(config, host, Arc::new(router))
    }

    /// Create an uploader that submits every file through `transport`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is invalid.
    pub fn with_transport(
        config: Config,
        host: Arc<dyn HostContext>,
        transport: Arc<dyn UploadTransport>,
    ) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            environment = ?config.environment,
            transport = transport.name(),
            "attachment uploader ready"
        );

        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config: Arc::new(config),
            host,
            transport,
            session: Arc::new(SessionTracker::new()),
            event_tx,
        })
    }

    /// Subscribe to uploader events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Watch the session counters (read-only)
    pub fn subscribe_progress(&self) -> watch::Receiver<UploadSession> {
        self.session.subscribe()
    }

    /// Current session counters
    pub fn session(&self) -> UploadSession {
        self.session.snapshot()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Spinner caption for the active batch, `None` when idle
    pub fn progress_text(&self) -> Option<String> {
        messages::progress_text(self.host.as_ref(), &self.session.snapshot())
    }

    /// Drop zone prompt
    pub fn drop_prompt(&self, drag_active: bool) -> String {
        messages::drop_prompt(self.host.as_ref(), drag_active)
    }

    /// Notice shown instead of the drop zone while the record is unsaved
    pub fn disabled_notice(&self, props: &RecordProps) -> Option<String> {
        messages::disabled_notice(self.host.as_ref(), props)
    }
}

fn document_store_transport(
    config: &Config,
    host: &dyn HostContext,
) -> Result<Option<Arc<dyn UploadTransport>>> {
    match (config.environment, config.transport) {
        (Environment::Local, _) => {
            let store: Arc<dyn UploadTransport> =
                Arc::new(LocalDocumentStore::new(config.document_store.local_delay));
            Ok(Some(store))
        }
        (Environment::Connected, TransportKind::DocumentStore) => {
            let base_url = host
                .client_base_url()
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    Error::config("host did not provide a client URL", "client_base_url")
                })?;
            let store: Arc<dyn UploadTransport> =
                Arc::new(DocumentStoreTransport::new(&base_url, &config.document_store)?);
            Ok(Some(store))
        }
        (Environment::Connected, TransportKind::InlineAttachment) => Ok(None),
    }
}
