//! Common test utilities for attachment-uploader integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod host;

#[allow(unused_imports)]
pub use fixtures::*;
pub use host::*;
