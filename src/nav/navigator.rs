use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::core::MediaError;
use crate::index::{CategoryIndex, CategoryIndexCache};
use crate::io::check_segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Prev => write!(f, "prev"),
        }
    }
}

/// Neighbour of `filename` in `index`, wrapping around at both ends.
///
/// A filename that is not in the index behaves as if it sat past the end:
/// `Next` yields the first entry and `Prev` the last. This is long-standing
/// client-visible behaviour and open to product review; change it here only.
///
/// Returns `None` only for an empty index.
pub fn step<'a>(index: &'a CategoryIndex, filename: &str, direction: Direction) -> Option<&'a str> {
    let len = index.len();
    if len == 0 {
        return None;
    }
    let target = match (index.position(filename), direction) {
        (Some(i), Direction::Next) => (i + 1) % len,
        (Some(i), Direction::Prev) => (i + len - 1) % len,
        (None, Direction::Next) => 0,
        (None, Direction::Prev) => len - 1,
    };
    index.get(target)
}

/// Answers next/previous queries against the cached category indexes.
pub struct Navigator {
    cache: Arc<CategoryIndexCache>,
}

impl Navigator {
    pub fn new(cache: Arc<CategoryIndexCache>) -> Self {
        Self { cache }
    }

    pub async fn next(&self, category: &str, filename: &str) -> Result<String, MediaError> {
        self.navigate(category, filename, Direction::Next).await
    }

    pub async fn prev(&self, category: &str, filename: &str) -> Result<String, MediaError> {
        self.navigate(category, filename, Direction::Prev).await
    }

    /// Fails with `Forbidden` for a traversal-shaped category and with
    /// `EmptyCategory` when there is nothing to navigate to. The filename is
    /// only a lookup key in the index, so any value is accepted.
    pub async fn navigate(
        &self,
        category: &str,
        filename: &str,
        direction: Direction,
    ) -> Result<String, MediaError> {
        check_segment(category)?;
        let index = self.cache.index_of(category).await;
        let result = step(&index, filename, direction)
            .ok_or_else(|| MediaError::EmptyCategory(category.to_string()))?;
        debug!(category = category, from = filename, to = result; "Navigated {direction}");
        Ok(result.to_string())
    }
}
