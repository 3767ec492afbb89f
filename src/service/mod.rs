mod media;

pub use media::{MediaFile, content_type_for};

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::conf::Config;
use crate::core::MediaError;
use crate::index::CategoryIndexCache;
use crate::io::{DirectoryLister, LocalLister, ensure_within_root, resolve_media_path};
use crate::nav::{Direction, Navigator};

/// Media index, navigation and file access over one media root.
pub struct MediaService {
    root: PathBuf,
    cache: Arc<CategoryIndexCache>,
    navigator: Navigator,
    sensitive: HashSet<String>,
    config: Config,
}

impl MediaService {
    pub fn new(config: Config) -> Self {
        let lister = Arc::new(LocalLister::new(config.media.root.clone()));
        Self::with_lister(config, lister)
    }

    /// Build the service around a custom lister. File access still goes to
    /// `config.media.root`.
    pub fn with_lister(config: Config, lister: Arc<dyn DirectoryLister>) -> Self {
        let cache = Arc::new(CategoryIndexCache::new(lister));
        Self {
            root: config.media.root.clone(),
            navigator: Navigator::new(Arc::clone(&cache)),
            cache,
            sensitive: config.media.sensitive_categories.iter().cloned().collect(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &CategoryIndexCache {
        &self.cache
    }

    pub fn is_sensitive(&self, category: &str) -> bool {
        self.sensitive.contains(category)
    }

    pub async fn next(&self, category: &str, filename: &str) -> Result<String, MediaError> {
        self.navigate(category, filename, Direction::Next).await
    }

    pub async fn prev(&self, category: &str, filename: &str) -> Result<String, MediaError> {
        self.navigate(category, filename, Direction::Prev).await
    }

    pub async fn navigate(
        &self,
        category: &str,
        filename: &str,
        direction: Direction,
    ) -> Result<String, MediaError> {
        self.log_access(category, filename, &direction.to_string());
        self.navigator.navigate(category, filename, direction).await
    }

    /// Open `<root>/<category>/<filename>` for streaming.
    ///
    /// `Forbidden` for traversal, hidden files and symlinks leaving the root;
    /// `NotFound` when the file is missing or not a regular file; `IoError`
    /// for any other failure. `NotFound` messages carry only the relative
    /// name.
    pub async fn fetch(&self, category: &str, filename: &str) -> Result<MediaFile, MediaError> {
        self.log_access(category, filename, "fetch");

        let path = resolve_media_path(&self.root, category, filename)?;
        let relative = format!("{category}/{filename}");
        let not_found = |err: MediaError| match err {
            MediaError::NotFound(_) => MediaError::NotFound(relative.clone()),
            other => other,
        };

        let canonical = ensure_within_root(&self.root, &path).await.map_err(not_found)?;
        let file = tokio::fs::File::open(&canonical)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => MediaError::NotFound(relative.clone()),
                _ => MediaError::IoError(format!("opening {}: {}", canonical.display(), e)),
            })?;
        let metadata = file.metadata().await.map_err(|e| {
            MediaError::IoError(format!("reading metadata for {}: {}", canonical.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(MediaError::NotFound(relative));
        }

        Ok(MediaFile {
            file,
            content_type: content_type_for(&path),
            len: metadata.len(),
        })
    }

    fn log_access(&self, category: &str, filename: &str, action: &str) {
        if self.is_sensitive(category) {
            warn!(category = category, filename = filename; "Sensitive media request: {action}");
        } else {
            info!(category = category, filename = filename; "Media request: {action}");
        }
    }
}
