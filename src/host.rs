//! Host form collaborators
//!
//! The uploader never reaches for ambient host state. Everything it needs from
//! the surrounding record form is injected through these traits when the
//! [`AttachmentUploader`](crate::AttachmentUploader) is constructed.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::types::RecordContext;

/// Synchronous view of the hosting record form
pub trait HostContext: Send + Sync {
    /// Base URL of the organization, `None` when not hosted
    fn client_base_url(&self) -> Option<String>;

    /// Filter metadata XML attached to a form control
    fn filter_metadata_xml(&self, control: &str) -> Option<String>;

    /// The record currently open in the form, if the host exposes one
    fn current_record(&self) -> Option<RecordContext>;

    /// Ask a form control to reload its data (fire and forget)
    fn refresh_control(&self, control: &str);

    /// Show an error to the user
    fn report_error(&self, message: &str);

    /// Look up a localized string; `None` when the key is unknown
    fn translate(&self, key: &str) -> Option<String>;
}

/// Generic record creation against the host's data store
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Create a record and return its identifier
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the record.
    async fn create_record(
        &self,
        entity: &str,
        fields: Map<String, Value>,
    ) -> crate::Result<String>;
}

/// Translate `key`, falling back to the key itself
pub(crate) fn translate_or_key(host: &dyn HostContext, key: &str) -> String {
    host.translate(key).unwrap_or_else(|| key.to_string())
}
