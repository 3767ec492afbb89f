use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::core::MediaError;

use super::DirectoryLister;

/// Lists `<root>/<category>` on the local filesystem.
pub struct LocalLister {
    root: PathBuf,
}

impl LocalLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DirectoryLister for LocalLister {
    async fn list(&self, category: &str) -> Result<Vec<String>, MediaError> {
        let dir = self.root.join(category);
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
                MediaError::NotFound(format!("category directory {}", dir.display()))
            }
            _ => MediaError::IoError(format!("reading directory {}: {}", dir.display(), e)),
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            MediaError::IoError(format!("reading directory {}: {}", dir.display(), e))
        })? {
            // Follows symlinks so a link to a file counts and a link to a directory does not.
            let is_file = match tokio::fs::metadata(entry.path()).await {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    debug!("skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            if !is_file {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                debug!("skipping non UTF-8 name in {}", dir.display());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        // String ordering is byte ordering for UTF-8.
        names.sort_unstable();
        names.dedup();
        Ok(names)
    }
}
