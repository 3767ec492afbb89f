use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::{OnceCell, RwLock};

use crate::core::MediaError;
use crate::io::DirectoryLister;

use super::CategoryIndex;

type Slot = Arc<OnceCell<CategoryIndex>>;

/// Process-wide map from category to its [`CategoryIndex`].
///
/// An index is read from the lister on first use and then served from memory
/// until [`invalidate`](Self::invalidate) drops it. Changes on disk after
/// that first read are not seen: a new file is unreachable through
/// navigation, and a deleted one is still returned as a neighbour (fetching it
/// then yields not found).
///
/// Concurrent first lookups of one category share a single listing. The map
/// lock only guards slot lookup and insertion and is released before the
/// lister runs, so listings of different categories never wait on each other.
///
/// The map is unbounded: one entry per category ever requested, including
/// categories that do not exist.
pub struct CategoryIndexCache {
    lister: Arc<dyn DirectoryLister>,
    slots: RwLock<HashMap<String, Slot>>,
}

impl CategoryIndexCache {
    pub fn new(lister: Arc<dyn DirectoryLister>) -> Self {
        Self {
            lister,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Get the index for `category`, listing the directory on first access.
    ///
    /// Never fails: a lister error is logged and cached as an empty index.
    pub async fn index_of(&self, category: &str) -> CategoryIndex {
        let slot = self.slot(category).await;
        slot.get_or_init(|| self.populate(category)).await.clone()
    }

    /// Forget the cached index for `category`. Returns whether one existed.
    ///
    /// Callers already holding the old index keep using it; the next
    /// [`index_of`](Self::index_of) lists the directory again.
    pub async fn invalidate(&self, category: &str) -> bool {
        let removed = self.slots.write().await.remove(category).is_some();
        if removed {
            info!(category = category; "Invalidated category index");
        }
        removed
    }

    /// Number of categories with a slot, populated or in flight.
    pub async fn cached_categories(&self) -> usize {
        self.slots.read().await.len()
    }

    async fn slot(&self, category: &str) -> Slot {
        if let Some(slot) = self.slots.read().await.get(category) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().await;
        Arc::clone(slots.entry(category.to_string()).or_default())
    }

    async fn populate(&self, category: &str) -> CategoryIndex {
        match self.lister.list(category).await {
            Ok(names) => {
                let index = CategoryIndex::from_names(names);
                debug!(category = category, entries = index.len(); "Indexed category");
                index
            }
            Err(MediaError::NotFound(msg)) => {
                warn!(category = category; "Category not found, caching empty index: {msg}");
                CategoryIndex::empty()
            }
            Err(e) => {
                error!(category = category; "Failed to list category, caching empty index: {e}");
                CategoryIndex::empty()
            }
        }
    }
}
