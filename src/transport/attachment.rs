//! Inline attachment transport

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::UploadTransport;
use crate::error::{Result, TransportError};
use crate::host::RecordService;
use crate::types::{AttachmentKind, Destination, FileDescriptor, ParentContext};

/// Creates attachment records through the host's record service
#[derive(Clone)]
pub struct AttachmentTransport {
    records: Arc<dyn RecordService>,
}

impl AttachmentTransport {
    /// Create a transport on top of `records`
    pub fn new(records: Arc<dyn RecordService>) -> Self {
        Self { records }
    }
}

/// Build the fields of an attachment record bound to `parent`
///
/// `mimetype` is only set when the file declared one.
pub fn attachment_record(
    descriptor: &FileDescriptor,
    kind: AttachmentKind,
    parent: &ParentContext,
) -> Map<String, Value> {
    let mut record = Map::new();

    let (binding_field, binding_value) = match kind {
        AttachmentKind::Activity => (
            "objectid_activitypointer@odata.bind".to_string(),
            format!("/activitypointers({})", parent.entity_id),
        ),
        AttachmentKind::Generic => (
            format!("objectid_{}@odata.bind", parent.entity_name),
            format!("/{}({})", parent.entity_set_name, parent.entity_id),
        ),
    };
    record.insert(binding_field, Value::String(binding_value));
    record.insert(
        kind.body_field().to_string(),
        Value::String(descriptor.body().to_string()),
    );

    if !descriptor.mime_type().is_empty() {
        record.insert(
            "mimetype".to_string(),
            Value::String(descriptor.mime_type().to_string()),
        );
    }
    record.insert(
        "filename".to_string(),
        Value::String(descriptor.name().to_string()),
    );
    record.insert(
        "objecttypecode".to_string(),
        Value::String(parent.entity_name.clone()),
    );

    record
}

#[async_trait]
impl UploadTransport for AttachmentTransport {
    async fn submit(
        &self,
        descriptor: &FileDescriptor,
        destination: &Destination,
        parent: &ParentContext,
    ) -> Result<()> {
        let Destination::InlineAttachment { kind } = destination else {
            return Err(TransportError::Unroutable {
                destination: destination.label(),
            }
            .into());
        };

        let entity = kind.entity_logical_name();
        let fields = attachment_record(descriptor, *kind, parent);

        match self.records.create_record(entity, fields).await {
            Ok(id) => {
                tracing::info!(entity, id = %id, name = descriptor.name(), "attachment created");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(entity, name = descriptor.name(), error = %e, "attachment rejected");
                Err(TransportError::Rejected {
                    entity: entity.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "attachment"
    }
}
