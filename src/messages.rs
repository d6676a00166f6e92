//! User-facing text composed from localized resources

use crate::host::{HostContext, translate_or_key};
use crate::types::{RecordProps, UploadSession};

/// Resource keys looked up through [`HostContext::translate`]
pub mod keys {
    /// Error prefix for a single-file batch
    pub const ERROR_SINGLE: &str = "error_while_uploading_attachment";
    /// Error prefix for a multi-file batch
    pub const ERROR_PLURAL: &str = "error_while_uploading_attachments";
    /// Progress caption
    pub const UPLOADING: &str = "uploading";
    /// Drop zone prompt while dragging
    pub const DROP_FILES_HERE: &str = "drop_files_here";
    /// Drop zone prompt when idle
    pub const DROP_OR_CLICK: &str = "drop_files_here_or_click_to_upload";
    /// Notice shown before the record has been saved
    pub const SAVE_RECORD: &str = "save_record_to_enable_content";
}

/// Message reported when a batch of `total` files stops on `error`
pub fn batch_error_message(
    host: &dyn HostContext,
    total: usize,
    error: &impl std::fmt::Display,
) -> String {
    let key = if total == 1 {
        keys::ERROR_SINGLE
    } else {
        keys::ERROR_PLURAL
    };
    format!("{} {error}", translate_or_key(host, key))
}

/// Spinner caption such as `Uploading (1/3)`; `None` when idle
pub fn progress_text(host: &dyn HostContext, session: &UploadSession) -> Option<String> {
    session.is_active().then(|| {
        format!(
            "{} ({}/{})",
            translate_or_key(host, keys::UPLOADING),
            session.current_index,
            session.total_count
        )
    })
}

/// Drop zone prompt
pub fn drop_prompt(host: &dyn HostContext, drag_active: bool) -> String {
    let key = if drag_active {
        keys::DROP_FILES_HERE
    } else {
        keys::DROP_OR_CLICK
    };
    translate_or_key(host, key)
}

/// Notice shown in place of the drop zone until the form supplies a record id
pub fn disabled_notice(host: &dyn HostContext, props: &RecordProps) -> Option<String> {
    (!props.has_record()).then(|| translate_or_key(host, keys::SAVE_RECORD))
}
