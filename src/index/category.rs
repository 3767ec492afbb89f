use std::sync::Arc;

/// Sorted, immutable filename list of one category.
///
/// Clones share the same allocation, so handing an index to a request is
/// cheap and can never observe a partially built list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryIndex {
    names: Arc<[String]>,
}

impl CategoryIndex {
    /// Build an index from lister output, enforcing byte order and uniqueness.
    pub fn from_names(mut names: Vec<String>) -> Self {
        names.sort_unstable();
        names.dedup();
        Self {
            names: names.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(String::as_str)
    }

    /// Position of an exact match.
    pub fn position(&self, filename: &str) -> Option<usize> {
        self.names
            .binary_search_by(|name| name.as_str().cmp(filename))
            .ok()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
