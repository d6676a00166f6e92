//! Simulated document store for local runs

use async_trait::async_trait;
use std::time::Duration;

use super::UploadTransport;
use crate::error::Result;
use crate::types::{Destination, FileDescriptor, ParentContext};

/// Document store stand-in that waits a fixed delay and always succeeds
///
/// Selected instead of [`DocumentStoreTransport`](super::DocumentStoreTransport)
/// when the uploader runs in [`Environment::Local`](crate::config::Environment::Local),
/// so nothing touches the network.
#[derive(Clone, Copy, Debug)]
pub struct LocalDocumentStore {
    delay: Duration,
}

impl LocalDocumentStore {
    /// Create a simulated store with the given upload latency
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl UploadTransport for LocalDocumentStore {
    async fn submit(
        &self,
        descriptor: &FileDescriptor,
        destination: &Destination,
        parent: &ParentContext,
    ) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::debug!(
            name = descriptor.name(),
            destination = destination.label(),
            parent = %parent.entity_id,
            "simulated document upload"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
