//! Front-end trait for turning source text into the syntax model.

use std::path::{Path, PathBuf};

use crate::syntax::Module;

/// Errors a front end can report for a single file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No grammar handles this file's extension.
    #[error("unsupported file type: {path}")]
    Unsupported {
        /// Path that was offered.
        path: PathBuf,
    },

    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error text.
        message: String,
    },

    /// The parser produced no tree.
    #[error("parser produced no tree for {path}")]
    NoTree {
        /// Path that failed.
        path: PathBuf,
    },
}

/// Lowers source files of one language family into a [`Module`].
///
/// Implement this to teach the analyzer a new language.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, with leading dot (e.g. `".ts"`).
    fn extensions(&self) -> &'static [&'static str];

    /// Returns true if `path` has one of [`Self::extensions`].
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.strip_prefix('.') == Some(ext))
            })
    }

    /// Parses `source` (read from `path`) into a module.
    ///
    /// # Errors
    ///
    /// Returns an error if the file type is unsupported or the grammar
    /// cannot be used. Syntax errors in the source are not an error:
    /// front ends lower whatever they could parse.
    fn parse(&self, path: &Path, source: &str) -> Result<Module, ParseError>;
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;
