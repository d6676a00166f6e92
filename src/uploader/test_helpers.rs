//! Shared test helpers for creating AttachmentUploader instances in tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::encoder::{FileSource, MemoryFile};
use crate::error::{Error, Result, TransportError};
use crate::host::{HostContext, RecordService};
use crate::transport::UploadTransport;
use crate::types::{Destination, FileDescriptor, ParentContext, RecordContext};

use super::AttachmentUploader;

/// Host double that records refreshes and reported errors
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub(crate) base_url: Option<String>,
    pub(crate) filter_xml: Option<String>,
    pub(crate) current: Mutex<Option<RecordContext>>,
    pub(crate) refreshed: Mutex<Vec<String>>,
    pub(crate) errors: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub(crate) fn with_record(entity_id: &str, entity_type_name: &str) -> Self {
        Self {
            current: Mutex::new(Some(RecordContext {
                entity_id: entity_id.to_string(),
                entity_type_name: entity_type_name.to_string(),
            })),
            ..Self::default()
        }
    }

    pub(crate) fn refreshed(&self) -> Vec<String> {
        self.refreshed.lock().unwrap().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
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
        self.current.lock().unwrap().clone()
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
            "uploading" => Some("Uploading".into()),
            _ => None,
        }
    }
}

/// Record service double that stores created records
#[derive(Default)]
pub(crate) struct FakeRecords {
    pub(crate) created: Mutex<Vec<(String, Map<String, Value>)>>,
}

#[async_trait]
impl RecordService for FakeRecords {
    async fn create_record(&self, entity: &str, fields: Map<String, Value>) -> Result<String> {
        let mut created = self.created.lock().unwrap();
        created.push((entity.to_string(), fields));
        Ok(format!("record-{}", created.len()))
    }
}

/// One recorded submission
#[derive(Clone, Debug)]
pub(crate) struct Submission {
    pub(crate) name: String,
    pub(crate) destination: Destination,
    pub(crate) parent: ParentContext,
}

/// Transport double answering from a script; succeeds once the script runs out
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    pub(crate) outcomes: Mutex<VecDeque<Option<u16>>>,
    pub(crate) submissions: Mutex<Vec<Submission>>,
}

impl ScriptedTransport {
    /// `None` succeeds, `Some(status)` fails with that status
    pub(crate) fn with_outcomes(outcomes: impl IntoIterator<Item = Option<u16>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        }
    }

    pub(crate) fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadTransport for ScriptedTransport {
    async fn submit(
        &self,
        descriptor: &FileDescriptor,
        destination: &Destination,
        parent: &ParentContext,
    ) -> Result<()> {
        self.submissions.lock().unwrap().push(Submission {
            name: descriptor.name().to_string(),
            destination: destination.clone(),
            parent: parent.clone(),
        });
        match self.outcomes.lock().unwrap().pop_front().flatten() {
            Some(status) => Err(TransportError::Status { status }.into()),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// File whose read always fails
pub(crate) struct UnreadableFile;

#[async_trait]
impl FileSource for UnreadableFile {
    fn name(&self) -> &str {
        "locked.docx"
    }

    fn mime_type(&self) -> &str {
        ""
    }

    async fn read_data_uri(&self) -> Result<String> {
        Err(Error::Encode {
            name: "locked.docx".into(),
            reason: "read aborted".into(),
        })
    }
}

/// `count` small text files named `file-<n>.txt`
pub(crate) fn text_files(count: usize) -> Vec<Box<dyn FileSource>> {
    (0..count)
        .map(|n| {
            Box::new(MemoryFile::new(
                format!("file-{n}.txt"),
                "text/plain",
                format!("content {n}").into_bytes(),
            )) as Box<dyn FileSource>
        })
        .collect()
}

/// Uploader wired to a scripted transport and a recording host
pub(crate) fn create_test_uploader(
    config: Config,
    host: RecordingHost,
    transport: ScriptedTransport,
) -> (AttachmentUploader, Arc<RecordingHost>, Arc<ScriptedTransport>) {
    let host = Arc::new(host);
    let transport = Arc::new(transport);
    let uploader =
        AttachmentUploader::with_transport(config, host.clone(), transport.clone()).unwrap();
    (uploader, host, transport)
}
