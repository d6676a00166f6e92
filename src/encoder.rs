//! File encoding
//!
//! Dropped files are read as data URIs and reduced to their raw base64
//! payload, which is what both transports send.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::FileDescriptor;

/// Marker that separates the data URI header from the payload
const BASE64_MARKER: &str = ";base64,";

/// MIME type used in data URIs when the file does not declare one
const FALLBACK_MIME: &str = "application/octet-stream";

/// A raw file handed over by a drop event
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Original file name
    fn name(&self) -> &str;

    /// Declared MIME type; empty when unknown
    fn mime_type(&self) -> &str;

    /// Read the whole file as a `data:<mime>;base64,<payload>` URI
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] when the read is aborted or fails.
    async fn read_data_uri(&self) -> Result<String>;
}

/// File whose content is already in memory
#[derive(Clone, Debug)]
pub struct MemoryFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    /// Create an in-memory file
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn read_data_uri(&self) -> Result<String> {
        Ok(data_uri(&self.mime_type, &self.bytes))
    }
}

/// File read from disk when it is encoded
#[derive(Clone, Debug)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    mime_type: String,
}

impl DiskFile {
    /// Create a file handle; the name is the last path component
    pub fn new(path: impl AsRef<Path>, mime_type: impl Into<String>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            mime_type: mime_type.into(),
        }
    }
}

#[async_trait]
impl FileSource for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn read_data_uri(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| Error::Encode {
            name: self.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(data_uri(&self.mime_type, &bytes))
    }
}

/// Build a base64 data URI the way a browser file reader does
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let mime = if mime_type.is_empty() {
        FALLBACK_MIME
    } else {
        mime_type
    };
    format!("data:{mime}{BASE64_MARKER}{}", STANDARD.encode(bytes))
}

/// Return the payload that follows the `;base64,` marker
pub fn strip_data_uri_prefix(uri: &str) -> Option<&str> {
    uri.find(BASE64_MARKER)
        .map(|start| &uri[start + BASE64_MARKER.len()..])
}

/// Encode a dropped file into a transport-ready descriptor
///
/// # Errors
///
/// Every failure is reported as [`Error::Encode`] naming the file.
pub async fn encode(file: &dyn FileSource) -> Result<FileDescriptor> {
    let uri = file.read_data_uri().await.map_err(|e| match e {
        e @ Error::Encode { .. } => e,
        other => Error::Encode {
            name: file.name().to_string(),
            reason: other.to_string(),
        },
    })?;

    let body = strip_data_uri_prefix(&uri).ok_or_else(|| Error::Encode {
        name: file.name().to_string(),
        reason: "content is not a base64 data URI".to_string(),
    })?;

    tracing::debug!(name = file.name(), encoded_len = body.len(), "encoded file");

    Ok(FileDescriptor::new(file.name(), file.mime_type(), body))
}
