//! # attachment-uploader
//!
//! Batch file-upload orchestrator for attachment widgets embedded in record forms.
//!
//! ## Design Philosophy
//!
//! attachment-uploader is designed to be:
//! - **Sequential** - Files of a drop event are submitted one at a time, in order
//! - **All or stop** - The first failing file ends the batch; earlier files stay uploaded
//! - **Host-agnostic** - The record form is injected as [`HostContext`] and [`RecordService`]
//! - **Event-driven** - Consumers subscribe to events and progress, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use attachment_uploader::{
//!     AttachmentUploader, Config, FileSource, HostContext, MemoryFile, RecordProps,
//!     RecordService,
//! };
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     host: Arc<dyn HostContext>,
//! #     records: Arc<dyn RecordService>,
//! # ) -> attachment_uploader::Result<()> {
//! let uploader = AttachmentUploader::new(Config::default(), host, records)?;
//!
//! // Render progress while the batch runs
//! let mut progress = uploader.subscribe_progress();
//! tokio::spawn(async move {
//!     while progress.changed().await.is_ok() {
//!         let session = *progress.borrow();
//!         println!("{}/{}", session.current_index, session.total_count);
//!     }
//! });
//!
//! let files: Vec<Box<dyn FileSource>> = vec![Box::new(MemoryFile::new(
//!     "notes.txt",
//!     "text/plain",
//!     b"hello".to_vec(),
//! ))];
//! let props = RecordProps::new("0f8fad5b-d9cb-469f-a165-70867728950e", "account", "accounts");
//! let report = uploader.upload_batch(&props, &files).await?;
//! println!("uploaded {} of {}", report.uploaded, report.total);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Destination routing
pub mod destination;
/// File encoding
pub mod encoder;
/// Error types
pub mod error;
/// Host form collaborators
pub mod host;
/// User-facing text
pub mod messages;
/// Parent record resolution
pub mod parent;
mod session;
/// Upload transports
pub mod transport;
/// Core types and events
pub mod types;
/// Upload session driver
pub mod uploader;

// Re-export commonly used types
pub use config::{Config, DocumentStoreConfig, Environment, TransportKind};
pub use encoder::{DiskFile, FileSource, MemoryFile};
pub use error::{Error, ErrorKind, Result, TransportError};
pub use host::{HostContext, RecordService};
pub use transport::{
    AttachmentTransport, DocumentStoreTransport, LocalDocumentStore, Router, UploadTransport,
};
pub use types::{
    AttachmentKind, BatchReport, Destination, Event, FileDescriptor, ParentContext, RecordContext,
    RecordProps, UploadSession,
};
pub use uploader::AttachmentUploader;
