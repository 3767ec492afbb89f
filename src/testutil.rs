//! Test and benchmark utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::conf::{Config, MediaConfig};
use crate::core::MediaError;
use crate::io::DirectoryLister;

/// A throwaway media root. Dropping it removes the directory.
pub struct MediaTree {
    dir: TempDir,
}

impl MediaTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create `category` if needed and add one small file per name.
    pub fn add(&self, category: &str, names: &[&str]) {
        for name in names {
            self.write(category, name, name.as_bytes());
        }
        fs::create_dir_all(self.category_dir(category)).unwrap();
    }

    pub fn write(&self, category: &str, name: &str, data: &[u8]) -> PathBuf {
        let dir = self.category_dir(category);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, data).unwrap();
        path
    }

    pub fn remove(&self, category: &str, name: &str) {
        fs::remove_file(self.category_dir(category).join(name)).unwrap();
    }

    fn category_dir(&self, category: &str) -> PathBuf {
        self.dir.path().join(category)
    }
}

impl Default for MediaTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Default config pointing at `root`.
pub fn test_config(root: &Path) -> Config {
    Config {
        media: MediaConfig {
            root: root.to_path_buf(),
            ..MediaConfig::default()
        },
        ..Config::default()
    }
}

#[derive(Clone)]
enum Listing {
    Names(Vec<String>),
    Fail,
}

/// In-memory [`DirectoryLister`] that counts calls per category.
///
/// Unknown categories fail with `NotFound`, like a missing directory.
#[derive(Default)]
pub struct CountingLister {
    listings: HashMap<String, Listing>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    calls: Mutex<HashMap<String, usize>>,
}

impl CountingLister {
    pub fn with_category(category: &str, names: &[&str]) -> Self {
        Self::default().and_category(category, names)
    }

    /// A lister whose only category fails with an IO error.
    pub fn failing(category: &str) -> Self {
        let mut lister = Self::default();
        lister.listings.insert(category.to_string(), Listing::Fail);
        lister
    }

    pub fn and_category(mut self, category: &str, names: &[&str]) -> Self {
        let names = names.iter().map(|n| n.to_string()).collect();
        self.listings
            .insert(category.to_string(), Listing::Names(names));
        self
    }

    /// Delay every listing, to widen race windows.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.default_delay = Duration::from_millis(ms);
        self
    }

    pub fn with_category_delay(mut self, category: &str, ms: u64) -> Self {
        self.delays
            .insert(category.to_string(), Duration::from_millis(ms));
        self
    }

    pub fn calls(&self, category: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(category)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DirectoryLister for CountingLister {
    async fn list(&self, category: &str) -> Result<Vec<String>, MediaError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(category.to_string())
            .or_default() += 1;

        let delay = self
            .delays
            .get(category)
            .copied()
            .unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match self.listings.get(category) {
            Some(Listing::Names(names)) => Ok(names.clone()),
            Some(Listing::Fail) => Err(MediaError::IoError(format!(
                "simulated failure listing {category}"
            ))),
            None => Err(MediaError::NotFound(category.to_string())),
        }
    }
}
