//! Parent record resolution

use crate::error::{Error, Result};
use crate::types::{ParentContext, RecordContext, RecordProps};

/// Determine the record that owns a batch
///
/// Props win when they carry an id. Otherwise the form has just created the
/// record and the id has not reached the widget yet, so the host's open
/// record is used instead.
///
/// # Errors
///
/// Returns [`Error::MissingParentContext`] when neither source yields an id.
pub fn resolve_parent(
    props: &RecordProps,
    current: Option<RecordContext>,
) -> Result<ParentContext> {
    if !props.id.is_empty() {
        return Ok(ParentContext {
            entity_id: props.id.clone(),
            entity_name: props.entity_name.clone(),
            entity_set_name: props.entity_set_name.clone(),
        });
    }

    let record = current.ok_or(Error::MissingParentContext)?;
    if record.entity_id.is_empty() {
        return Err(Error::MissingParentContext);
    }

    tracing::debug!(
        entity_id = %record.entity_id,
        entity = %record.entity_type_name,
        "using the form's open record as parent"
    );

    Ok(ParentContext {
        entity_id: record.entity_id,
        entity_name: record.entity_type_name,
        entity_set_name: props.entity_set_name.clone(),
    })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn open_contact() -> RecordContext {
        RecordContext {
            entity_id: "abc".into(),
            entity_type_name: "contact".into(),
        }
    }

    #[test]
    fn supplied_id_is_used_verbatim() {
        let props = RecordProps::new("{1234}", "account", "accounts");

        let parent = resolve_parent(&props, Some(open_contact())).unwrap();

        assert_eq!(parent.entity_id, "{1234}");
        assert_eq!(parent.entity_name, "account");
        assert_eq!(parent.entity_set_name, "accounts");
    }

    #[test]
    fn empty_id_falls_back_to_open_record() {
        let props = RecordProps::new("", "account", "contacts");

        let parent = resolve_parent(&props, Some(open_contact())).unwrap();

        assert_eq!(parent.entity_id, "abc");
        assert_eq!(parent.entity_name, "contact");
        assert_eq!(parent.entity_set_name, "contacts");
    }

    #[test]
    fn no_host_record_is_missing_parent() {
        let props = RecordProps::new("", "account", "accounts");

        let result = resolve_parent(&props, None);

        assert!(matches!(result, Err(Error::MissingParentContext)));
    }

    #[test]
    fn host_record_without_id_is_missing_parent() {
        let props = RecordProps::new("", "account", "accounts");
        let unsaved = RecordContext {
            entity_id: String::new(),
            entity_type_name: "account".into(),
        };

        let result = resolve_parent(&props, Some(unsaved));

        assert!(matches!(result, Err(Error::MissingParentContext)));
    }
}
