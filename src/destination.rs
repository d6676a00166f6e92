//! Destination routing
//!
//! Picks the storage target for a batch from configuration and the owning
//! entity type, and reads the document-store folder hint out of the host's
//! filter metadata.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::config::{Config, TransportKind};
use crate::host::HostContext;
use crate::types::{AttachmentKind, Destination};

/// Entity types whose attachments are activity attachments
const ACTIVITY_ENTITIES: &[&str] = &["email", "appointment"];

/// Filter condition attribute that carries the document folder
const FOLDER_ATTRIBUTE: &str = "relativelocation";

/// Decide the inline attachment shape for an entity type
///
/// Email and appointment records get activity attachments unless the
/// deployment forces note attachments everywhere.
pub fn resolve_attachment_kind(
    entity_type_name: &str,
    use_note_attachment: bool,
) -> AttachmentKind {
    let is_activity = ACTIVITY_ENTITIES
        .iter()
        .any(|entity| entity.eq_ignore_ascii_case(entity_type_name));

    if !use_note_attachment && is_activity {
        AttachmentKind::Activity
    } else {
        AttachmentKind::Generic
    }
}

/// Compute the destination for files owned by `entity_type_name`
pub fn resolve_destination(
    config: &Config,
    host: &dyn HostContext,
    entity_type_name: &str,
) -> Destination {
    match config.transport {
        TransportKind::DocumentStore => {
            let filter_xml = config
                .refresh_target()
                .and_then(|control| host.filter_metadata_xml(control));
            Destination::ExternalDocumentStore {
                folder_path: extract_folder_path(filter_xml.as_deref()),
            }
        }
        TransportKind::InlineAttachment => Destination::InlineAttachment {
            kind: resolve_attachment_kind(entity_type_name, config.use_note_attachment),
        },
    }
}

/// Find the `relativelocation` condition value in filter metadata
///
/// No metadata, no matching condition, or unparsable XML all yield an empty path.
pub fn extract_folder_path(filter_xml: Option<&str>) -> String {
    let Some(xml) = filter_xml else {
        return String::new();
    };

    match find_folder_condition(xml) {
        Ok(path) => path.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparsable filter metadata");
            String::new()
        }
    }
}

fn find_folder_condition(xml: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"condition" =>
            {
                if attribute_value(&element, b"attribute")?.as_deref() == Some(FOLDER_ATTRIBUTE) {
                    return attribute_value(&element, b"value");
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn attribute_value(
    element: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, quick_xml::Error> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == key {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
