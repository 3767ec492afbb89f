use std::path::Path;

use tokio::fs::File;

/// An opened media file ready to be streamed.
#[derive(Debug)]
pub struct MediaFile {
    pub file: File,
    pub content_type: String,
    pub len: u64,
}

/// Content type from the file extension, `application/octet-stream` when
/// unknown. The bytes themselves are never inspected.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
