//! Core types and events

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// A dropped file encoded for transport
///
/// Built once by [`encode`](crate::encoder::encode) and handed to exactly one
/// transport. The MIME type is kept exactly as the file reported it, so an
/// unknown type stays an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDescriptor {
    name: String,
    mime_type: String,
    body: String,
}

impl FileDescriptor {
    /// Create a descriptor from an already base64-encoded body
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            body: body.into(),
        }
    }

    /// Original file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type, possibly empty
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// File content as a base64 string, without any data URI prefix
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Shape of an inline attachment record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Attachment of an activity (email, appointment)
    Activity,
    /// Note attached to any other record
    Generic,
}

impl AttachmentKind {
    /// Logical name of the entity the attachment record is created on
    pub fn entity_logical_name(&self) -> &'static str {
        match self {
            AttachmentKind::Activity => "activitymimeattachment",
            AttachmentKind::Generic => "annotation",
        }
    }

    /// Field that carries the base64 content
    pub fn body_field(&self) -> &'static str {
        match self {
            AttachmentKind::Activity => "body",
            AttachmentKind::Generic => "documentbody",
        }
    }
}

/// Remote storage target for a file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Destination {
    /// Separate document repository reached through the upload action
    ExternalDocumentStore {
        /// Folder hint taken from the host's filter metadata (may be empty)
        folder_path: String,
    },
    /// Attachment record in the host's own data store
    InlineAttachment {
        /// Record shape to create
        kind: AttachmentKind,
    },
}

impl Destination {
    /// Short name for logging and routing errors
    pub fn label(&self) -> &'static str {
        match self {
            Destination::ExternalDocumentStore { .. } => "external document store",
            Destination::InlineAttachment { .. } => "inline attachment",
        }
    }
}

/// The record that owns an uploaded batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentContext {
    /// Identifier of the owning record (never empty)
    pub entity_id: String,
    /// Logical name of the owning record's entity type
    pub entity_name: String,
    /// Entity set name used in OData bindings
    pub entity_set_name: String,
}

/// The record currently open in the host form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordContext {
    /// Identifier of the open record
    pub entity_id: String,
    /// Logical name of the open record's entity type
    pub entity_type_name: String,
}

/// Parent record properties handed to the widget by the form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordProps {
    /// Owning record id; empty until a newly created record propagates its id
    #[serde(default)]
    pub id: String,
    /// Logical name of the owning entity
    pub entity_name: String,
    /// Entity set name of the owning entity
    pub entity_set_name: String,
}

impl RecordProps {
    /// Create props for an existing record
    pub fn new(
        id: impl Into<String>,
        entity_name: impl Into<String>,
        entity_set_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            entity_name: entity_name.into(),
            entity_set_name: entity_set_name.into(),
        }
    }

    /// Whether the form already supplied an owning record id
    pub fn has_record(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Progress counters of the batch being uploaded
///
/// `total_count == 0` means no batch is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSession {
    /// Number of files in the active batch
    pub total_count: usize,
    /// Index of the file currently being processed
    pub current_index: usize,
}

impl UploadSession {
    /// Whether a batch is currently running
    pub fn is_active(&self) -> bool {
        self.total_count > 0
    }
}

/// Outcome of one drop event
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of files in the batch
    pub total: usize,
    /// Number of files submitted successfully before the batch ended
    pub uploaded: usize,
    /// Message reported to the user, if the batch stopped on an error
    pub error: Option<String>,
}

impl BatchReport {
    /// Whether every file was submitted
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.uploaded == self.total
    }
}

/// Events emitted by the uploader
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A drop event started a batch
    BatchStarted {
        /// Number of files in the batch
        total: usize,
    },
    /// Processing of one file began
    FileStarted {
        /// Zero-based position in the batch
        index: usize,
        /// Number of files in the batch
        total: usize,
        /// File name
        name: String,
    },
    /// One file was submitted successfully
    FileUploaded {
        /// Zero-based position in the batch
        index: usize,
        /// File name
        name: String,
        /// Where the file went
        destination: Destination,
    },
    /// The batch stopped on an error
    BatchFailed {
        /// Number of files attempted, including the failing one
        attempted: usize,
        /// Classification of the error
        kind: ErrorKind,
        /// Message reported to the user
        message: String,
    },
    /// The batch ended and the session was reset
    BatchFinished {
        /// Files submitted successfully
        uploaded: usize,
        /// Number of files in the batch
        total: usize,
    },
    /// The refresh target was asked to reload
    Refreshed {
        /// Name of the refreshed control
        control: String,
    },
}
