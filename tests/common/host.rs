//! Recording doubles for the host form collaborators

use async_trait::async_trait;
use attachment_uploader::{HostContext, RecordContext, RecordService, Result};
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Host form double that records every side effect
#[derive(Default)]
pub struct RecordingHost {
    pub base_url: Option<String>,
    pub filter_xml: Option<String>,
    pub current: Option<RecordContext>,
    pub refreshed: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingHost {
    /// Host connected to `base_url`
    pub fn connected(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl HostContext for RecordingHost {
    fn client_base_url(&self) -> Option<String> {
        self.base_url.clone()
    }

    fn filter_metadata_xml(&self, _control: &str) -> Option<String> {
        self.filter_xml.clone()
    }

    fn current_record(&self) -> Option<RecordContext> {
        self.current.clone()
    }

    fn refresh_control(&self, control: &str) {
        self.refreshed.lock().unwrap().push(control.to_string());
    }

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn translate(&self, key: &str) -> Option<String> {
        match key {
            "error_while_uploading_attachment" => Some("Error while uploading attachment:".into()),
            "error_while_uploading_attachments" => {
                Some("Error while uploading attachments:".into())
            }
            _ => None,
        }
    }
}

/// Record service double that keeps created records
#[derive(Default)]
pub struct RecordingRecords {
    pub created: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl RecordingRecords {
    pub fn created(&self) -> Vec<(String, Map<String, Value>)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordService for RecordingRecords {
    async fn create_record(&self, entity: &str, fields: Map<String, Value>) -> Result<String> {
        let mut created = self.created.lock().unwrap();
        created.push((entity.to_string(), fields));
        Ok(format!("{entity}-{}", created.len()))
    }
}
