//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::utils::paths::relative_to;

/// Context provided to per-file rules.
///
/// Carries the file path and the project root explicitly, so rules never
/// consult the process working directory.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered (usually absolute).
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Project root that relative paths and domain prefixes resolve against.
    pub root: &'a Path,
    /// Path relative to the project root, with `.`/`..` folded.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &'a Path) -> Self {
        Self {
            path,
            content,
            root,
            relative_path: relative_to(root, path),
        }
    }
}
