//! Configuration types for attachment-uploader

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the widget is running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Standalone test harness: document store uploads are simulated
    Local,
    /// Hosted inside a record form with a live backend
    #[default]
    Connected,
}

/// Which transport the deployment submits files through
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Post documents to the external document store upload action
    #[default]
    DocumentStore,
    /// Create attachment records in the host's own data store
    InlineAttachment,
}

/// External document store settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    /// Relative API path of the upload action (default: "/api/data/v9.0/UploadDocument")
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Timeout for a single upload request (default: 100 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Simulated upload latency in [`Environment::Local`] (default: 1000 ms)
    #[serde(default = "default_local_delay", with = "duration_ms_serde")]
    pub local_delay: Duration,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            upload_path: default_upload_path(),
            request_timeout: default_request_timeout(),
            local_delay: default_local_delay(),
        }
    }
}

/// Main configuration for [`AttachmentUploader`](crate::AttachmentUploader)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Runtime environment (default: connected)
    #[serde(default)]
    pub environment: Environment,

    /// Active transport for this deployment (default: document store)
    #[serde(default)]
    pub transport: TransportKind,

    /// Always create generic note attachments, even for email and appointment records
    #[serde(default)]
    pub use_note_attachment: bool,

    /// Control refreshed after each batch; also the source of the folder-path filter metadata
    #[serde(default)]
    pub control_to_refresh: Option<String>,

    /// External document store settings
    #[serde(default)]
    pub document_store: DocumentStoreConfig,
}

impl Config {
    /// Check the configuration for values that can never work
    pub fn validate(&self) -> Result<()> {
        let path = &self.document_store.upload_path;
        if path.is_empty() {
            return Err(Error::config(
                "upload path must not be empty",
                "document_store.upload_path",
            ));
        }
        if !path.starts_with('/') {
            return Err(Error::config(
                format!("upload path {path:?} must start with '/'"),
                "document_store.upload_path",
            ));
        }
        if self.document_store.request_timeout.is_zero() {
            return Err(Error::config(
                "request timeout must be greater than zero",
                "document_store.request_timeout",
            ));
        }
        Ok(())
    }

    /// The refresh target as configured, `None` when missing or blank
    pub fn refresh_target(&self) -> Option<&str> {
        self.control_to_refresh
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

fn default_upload_path() -> String {
    "/api/data/v9.0/UploadDocument".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(100)
}

fn default_local_delay() -> Duration {
    Duration::from_millis(1000)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Millisecond Duration serialization helper
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
