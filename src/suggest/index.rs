//! Sorted, case-folded name index.
//!
//! The index is built once from an unsorted roster and shared read-only by
//! every suggestion lookup.

use std::ops::Deref;
use std::sync::Arc;

/// An immutable, lower-cased, ascending sequence of names.
///
/// Ordering is byte-wise on UTF-8, which is the same as code-point order.
/// Duplicates from the source are kept. Cloning is cheap: clones share the
/// same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameIndex {
    names: Arc<[String]>,
}

impl NameIndex {
    /// Builds an index from raw names: lower-cases each one and sorts.
    pub fn build<I, S>(raw_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = raw_names
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();
        names.sort_unstable();

        Self {
            names: names.into(),
        }
    }

    /// Returns an index with no names. Every query against it is empty.
    pub fn empty() -> Self {
        Self {
            names: Arc::from(Vec::new()),
        }
    }

    /// Returns the names as a sorted slice.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Returns up to five names starting with `prefix` (case-insensitive).
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        super::query::suggest(self, prefix)
    }
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for NameIndex {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::build(iter)
    }
}
