//! External document store transport

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::{Value, json};
use std::time::Duration;

use super::UploadTransport;
use crate::config::DocumentStoreConfig;
use crate::error::{Error, Result, TransportError};
use crate::types::{Destination, FileDescriptor, ParentContext};

/// OData type of the document created in the store
const DOCUMENT_ODATA_TYPE: &str = "Microsoft.Dynamics.CRM.sharepointdocument";

/// Namespace prefix for parent entity references
const ENTITY_ODATA_NAMESPACE: &str = "Microsoft.Dynamics.CRM";

/// Posts files to the document store upload action
///
/// A response of 200 or 204 is success. Any other status, or a request that
/// never completes, fails the submission.
#[derive(Clone, Debug)]
pub struct DocumentStoreTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl DocumentStoreTransport {
    /// Create a transport posting to `base_url` + the configured upload path
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `base_url` is not an absolute URL, and
    /// [`Error::Network`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, config: &DocumentStoreConfig) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| {
            Error::config(
                format!("invalid client URL {base_url:?}: {e}"),
                "client_base_url",
            )
        })?;

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), config.upload_path);
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            timeout: config.request_timeout,
        })
    }

    /// Full URL of the upload action
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build the JSON body of an upload action request
///
/// Existing documents at the same location are always overwritten.
pub fn upload_document_payload(
    descriptor: &FileDescriptor,
    parent: &ParentContext,
    folder_path: &str,
) -> Value {
    let mut parent_reference = serde_json::Map::new();
    parent_reference.insert(
        "@odata.type".to_string(),
        Value::String(format!("{ENTITY_ODATA_NAMESPACE}.{}", parent.entity_name)),
    );
    parent_reference.insert(
        format!("{}id", parent.entity_name),
        Value::String(parent.entity_id.clone()),
    );

    json!({
        "Content": descriptor.body(),
        "Entity": {
            "@odata.type": DOCUMENT_ODATA_TYPE,
            "locationid": "",
            "title": descriptor.name(),
        },
        "OverwriteExisting": true,
        "ParentEntityReference": parent_reference,
        "FolderPath": folder_path,
    })
}

#[async_trait]
impl UploadTransport for DocumentStoreTransport {
    async fn submit(
        &self,
        descriptor: &FileDescriptor,
        destination: &Destination,
        parent: &ParentContext,
    ) -> Result<()> {
        let Destination::ExternalDocumentStore { folder_path } = destination else {
            return Err(TransportError::Unroutable {
                destination: destination.label(),
            }
            .into());
        };

        let payload = upload_document_payload(descriptor, parent, folder_path);
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::info!(
                    status,
                    name = descriptor.name(),
                    folder = %folder_path,
                    "document store responded"
                );
                if status == 200 || status == 204 {
                    Ok(())
                } else {
                    Err(TransportError::Status { status }.into())
                }
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!(
                    name = descriptor.name(),
                    timeout = ?self.timeout,
                    "document upload timed out"
                );
                Err(TransportError::Timeout {
                    timeout: self.timeout,
                }
                .into())
            }
            Err(e) => {
                tracing::warn!(name = descriptor.name(), error = %e, "document upload failed");
                Err(Error::Network(e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "document_store"
    }
}
