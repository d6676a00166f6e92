//! File fixtures for drop events

use attachment_uploader::{FileSource, MemoryFile};

/// Filter metadata of a document grid pointing at the `Contracts/2025` folder
pub const CONTRACTS_FILTER_XML: &str = r#"<fetch version="1.0" mapping="logical">
  <entity name="sharepointdocument">
    <filter type="and">
      <condition attribute="relativelocation" operator="eq" value="Contracts/2025" />
    </filter>
  </entity>
</fetch>"#;

/// `count` in-memory files named `doc-<n>.txt`
pub fn dropped_files(count: usize) -> Vec<Box<dyn FileSource>> {
    (0..count)
        .map(|n| {
            Box::new(MemoryFile::new(
                format!("doc-{n}.txt"),
                "text/plain",
                format!("document {n}").into_bytes(),
            )) as Box<dyn FileSource>
        })
        .collect()
}

/// A single file with no declared MIME type
pub fn untyped_file() -> Box<dyn FileSource> {
    Box::new(MemoryFile::new("scan", "", vec![0x89u8, 0x50, 0x4e, 0x47]))
}
