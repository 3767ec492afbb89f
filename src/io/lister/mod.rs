mod local;

pub use local::LocalLister;

use async_trait::async_trait;

use crate::core::MediaError;

/// Enumerates the media files of one category directory.
///
/// Implementations return names (not paths) sorted by raw byte order with no
/// duplicates. A missing directory is reported as [`MediaError::NotFound`] so
/// callers can tell it apart from a directory that exists but is empty.
///
/// The category is trusted: callers must run it through
/// [`check_segment`](crate::io::check_segment) before listing.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    async fn list(&self, category: &str) -> Result<Vec<String>, MediaError>;
}
