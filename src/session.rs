//! Upload session counters
//!
//! The driver owns the only writer. Progress renderers get read-only
//! `watch` receivers.

use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::types::UploadSession;

/// Single-writer holder of the [`UploadSession`] counters
#[derive(Debug)]
pub(crate) struct SessionTracker {
    tx: watch::Sender<UploadSession>,
}

impl SessionTracker {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(UploadSession::default());
        Self { tx }
    }

    /// Current counters
    pub(crate) fn snapshot(&self) -> UploadSession {
        *self.tx.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<UploadSession> {
        self.tx.subscribe()
    }

    /// Start a session for `total` files
    ///
    /// Check and update happen under the channel lock, so two drop events can
    /// never both start a session.
    pub(crate) fn begin(&self, total: usize) -> Result<()> {
        let mut busy = false;
        self.tx.send_if_modified(|session| {
            if session.is_active() {
                busy = true;
                return false;
            }
            *session = UploadSession {
                total_count: total,
                current_index: 0,
            };
            total > 0
        });

        if busy {
            Err(Error::BatchInProgress)
        } else {
            Ok(())
        }
    }

    pub(crate) fn advance(&self, index: usize) {
        self.tx.send_if_modified(|session| {
            debug_assert!(index <= session.total_count);
            if session.current_index == index {
                return false;
            }
            session.current_index = index;
            true
        });
    }

    /// Return to Idle
    pub(crate) fn reset(&self) {
        self.tx.send_replace(UploadSession::default());
    }
}
