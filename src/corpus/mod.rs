//! Corpus module for document discovery and loading.
//!
//! This module provides functionality for:
//! - Deterministic traversal of the input roots
//! - Filtering candidates by extension, hidden status, and patterns
//! - Loading document text as UTF-8
//!
//! # Architecture
//!
//! The corpus is divided into submodules:
//! - [`walker`]: Root traversal and candidate discovery
//! - [`document`]: Document loading and text access
//!
//! # Example
//!
//! ```no_run
//! use sectdupe::corpus::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! // Configure the walker
//! let config = WalkerConfig {
//!     skip_hidden: true,
//!     ..Default::default()
//! };
//!
//! // Walk the roots in a stable order
//! let walker = Walker::new(vec![PathBuf::from("docs")], config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod document;
pub mod walker;

use std::path::PathBuf;
use std::sync::Arc;

// Re-export main types
pub use document::Document;
pub use walker::Walker;

/// Configuration for corpus traversal.
///
/// Controls filtering, symlink handling, and other walk behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Warning: May cause infinite loops with symlink cycles.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// File extensions treated as documents (lowercase, without dot).
    pub extensions: Vec<String>,

    /// Glob patterns to ignore (gitignore-style).
    /// These are applied in addition to any .gitignore files.
    pub ignore_patterns: Vec<String>,

    /// Filename regexes a candidate must match (any of them).
    pub regex_include: Vec<regex::Regex>,

    /// Filename regexes that exclude a candidate (any of them).
    pub regex_exclude: Vec<regex::Regex>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            skip_hidden: false,
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
            regex_include: Vec::new(),
            regex_exclude: Vec::new(),
        }
    }
}

/// The extensions scanned when the user does not override them.
#[must_use]
pub fn default_extensions() -> Vec<String> {
    vec![
        "md".to_string(),
        "markdown".to_string(),
        "txt".to_string(),
    ]
}

/// Errors that can occur while discovering or loading documents.
#[derive(thiserror::Error, Debug, Clone)]
pub enum CorpusError {
    /// The specified root path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The document is not valid UTF-8 text.
    #[error("Not a text document: {0}")]
    NotText(PathBuf),

    /// An I/O error occurred while accessing a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Traversal failed below a root (broken link, permission, etc).
    #[error("Walk error under {root}: {message}")]
    Walk {
        /// Root being traversed when the error occurred
        root: PathBuf,
        /// Walkdir's description of the failure
        message: String,
    },
}

impl CorpusError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io {
            path,
            source: Arc::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walker_config_default() {
        let config = WalkerConfig::default();

        assert!(!config.follow_symlinks);
        assert!(!config.skip_hidden);
        assert_eq!(config.extensions, vec!["md", "markdown", "txt"]);
        assert!(config.ignore_patterns.is_empty());
        assert!(config.regex_include.is_empty());
        assert!(config.regex_exclude.is_empty());
    }

    #[test]
    fn test_corpus_error_display() {
        let err = CorpusError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Path not found: /missing");

        let err = CorpusError::NotText(PathBuf::from("/bin/ls"));
        assert_eq!(err.to_string(), "Not a text document: /bin/ls");

        let err = CorpusError::Walk {
            root: PathBuf::from("/docs"),
            message: "loop detected".to_string(),
        };
        assert_eq!(err.to_string(), "Walk error under /docs: loop detected");
    }

    #[test]
    fn test_corpus_error_io_is_cloneable() {
        let err = CorpusError::io(
            PathBuf::from("/docs/a.md"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let clone = err.clone();
        assert_eq!(err.to_string(), clone.to_string());
    }
}
