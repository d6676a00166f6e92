//! Error types for attachment-uploader
//!
//! Every failure inside a batch is batch-fatal. The driver catches it once,
//! turns its `Display` text into the user-facing report and resets the
//! session, so the messages here are what the end user eventually reads.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for attachment-uploader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for attachment-uploader
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "upload_path")
        key: Option<String>,
    },

    /// Reading a dropped file failed or was aborted
    #[error("failed to read file {name}: {reason}")]
    Encode {
        /// Name of the file that could not be read
        name: String,
        /// The reason reading failed
        reason: String,
    },

    /// The remote side refused or failed the submission
    #[error("upload failed: {0}")]
    Transport(#[from] TransportError),

    /// Neither the widget props nor the host carry an owning record
    #[error("no parent record is available for the upload")]
    MissingParentContext,

    /// A drop event arrived while another batch is still uploading
    #[error("an upload batch is already in progress")]
    BatchInProgress,

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a host collaborator such as a
    /// [`RecordService`](crate::RecordService) implementation
    #[error("{0}")]
    Other(String),
}

/// Submission failures reported by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Document store answered with something other than 200 or 204
    #[error("document store returned status {status}")]
    Status {
        /// The HTTP status code returned
        status: u16,
    },

    /// Record creation was rejected by the host
    #[error("creating {entity} record failed: {reason}")]
    Rejected {
        /// Logical name of the entity that could not be created
        entity: String,
        /// The reason reported by the record service
        reason: String,
    },

    /// The request did not complete within the configured timeout
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// No transport is registered for the resolved destination
    #[error("no transport registered for {destination}")]
    Unroutable {
        /// Short name of the destination that could not be routed
        destination: &'static str,
    },
}

/// Coarse classification of errors, as surfaced in events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// File read aborted or errored
    EncodeFailure,
    /// Non-success status, rejected record creation or network failure
    TransportFailure,
    /// No resolvable owning record
    MissingParentContext,
    /// Overlapping drop event
    BatchInProgress,
    /// Invalid configuration
    Config,
    /// Anything else
    Internal,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Encode { .. } => ErrorKind::EncodeFailure,
            Error::Transport(_) | Error::Network(_) => ErrorKind::TransportFailure,
            Error::MissingParentContext => ErrorKind::MissingParentContext,
            Error::BatchInProgress => ErrorKind::BatchInProgress,
            Error::Config { .. } => ErrorKind::Config,
            Error::Other(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for a configuration error bound to a key
    pub(crate) fn config(message: impl Into<String>, key: &str) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
