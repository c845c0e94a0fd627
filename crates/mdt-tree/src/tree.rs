//! Repository trees
//!
//! [`RepoTree`] is the scanner's output: an ordered list of files with their
//! contents. [`TreeIndex`] is the normalized lookup view the resolvers use.

use crate::path::normalize_path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Single file in a scanned repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFile {
    /// Repo-relative, forward-slash path
    pub path: String,
    /// File content (empty when the scanner only listed paths)
    #[serde(default)]
    pub content: String,
}

impl RepoFile {
    /// Create new file entry
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Immutable in-memory view of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTree {
    /// Files in scanner order
    #[serde(default)]
    pub files: Vec<RepoFile>,
}

impl RepoTree {
    /// Create tree from files
    #[inline]
    #[must_use]
    pub fn new(files: Vec<RepoFile>) -> Self {
        Self { files }
    }

    /// Create a content-less tree from a path list
    #[must_use]
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: paths
                .into_iter()
                .map(|path| RepoFile::new(path, String::new()))
                .collect(),
        }
    }

    /// Add a file, returning the extended tree
    #[inline]
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push(RepoFile::new(path, content));
        self
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the tree has no files
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Build the normalized lookup index
    #[inline]
    #[must_use]
    pub fn index(&self) -> TreeIndex<'_> {
        TreeIndex::new(self)
    }
}

/// Normalized, tree-ordered lookup over a [`RepoTree`]
///
/// Paths are normalized on the way in and on lookup. When the scanner emits
/// the same path twice, the first occurrence wins.
#[derive(Debug, Clone)]
pub struct TreeIndex<'a> {
    entries: IndexMap<String, &'a str>,
}

impl<'a> TreeIndex<'a> {
    /// Index a tree
    #[must_use]
    pub fn new(tree: &'a RepoTree) -> Self {
        let mut entries = IndexMap::with_capacity(tree.files.len());
        for file in &tree.files {
            let normalized = normalize_path(&file.path);
            if normalized.is_empty() {
                continue;
            }
            entries.entry(normalized).or_insert(file.content.as_str());
        }
        Self { entries }
    }

    /// Check if a path exists
    #[inline]
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.entries.contains_key(normalize_path(path).as_str())
    }

    /// Content of a file, `None` when absent or empty
    #[must_use]
    pub fn content(&self, path: &str) -> Option<&'a str> {
        self.entries
            .get(normalize_path(path).as_str())
            .copied()
            .filter(|content| !content.is_empty())
    }

    /// Paths in tree order
    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Paths in lexicographic order
    #[must_use]
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.paths().collect();
        paths.sort_unstable();
        paths
    }

    /// Paths matching a predicate, in tree order
    #[must_use]
    pub fn matching(&self, predicate: impl Fn(&str) -> bool) -> Vec<String> {
        self.paths()
            .filter(|path| predicate(path))
            .map(str::to_string)
            .collect()
    }

    /// Number of distinct paths
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
