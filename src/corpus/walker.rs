//! Candidate discovery with deterministic traversal order.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for collecting document paths
//! from one or more roots. Roots are visited in the order the caller supplied
//! them; within a root, [`walkdir`] traverses entries sorted by file name.
//! That combined order is what the rest of the pipeline calls "document
//! order", so it must be stable across runs of the same tree.
//!
//! # Features
//!
//! - Roots may be plain files (yielded directly) or directories
//! - Gitignore-style pattern matching via the `ignore` crate
//! - Extension, hidden-file, and filename-regex filtering
//! - Errors are yielded inline so one unreadable entry never stops the walk
//!
//! # Example
//!
//! ```no_run
//! use sectdupe::corpus::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! let walker = Walker::new(vec![PathBuf::from("docs")], WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use walkdir::WalkDir;

use super::{CorpusError, WalkerConfig};

/// Document discovery over a list of roots.
///
/// Produces candidate paths in a stable order: roots in caller order,
/// entries within each root sorted lexicographically by file name.
#[derive(Debug)]
pub struct Walker {
    /// Roots to visit, in caller order
    roots: Vec<PathBuf>,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given roots.
    ///
    /// # Arguments
    ///
    /// * `roots` - Files or directories to visit, in the caller's order
    /// * `config` - Walker configuration options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sectdupe::corpus::{Walker, WalkerConfig};
    /// use std::path::PathBuf;
    ///
    /// let walker = Walker::new(vec![PathBuf::from(".")], WalkerConfig::default());
    /// ```
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, config: WalkerConfig) -> Self {
        Self { roots, config }
    }

    /// Walk all roots, collecting candidate paths in document order.
    ///
    /// Per-entry failures are returned inline as [`CorpusError`] values so
    /// the caller can log them and keep going. A root that does not exist
    /// produces a single `NotFound` error and contributes no candidates.
    #[must_use]
    pub fn walk(&self) -> Vec<Result<PathBuf, CorpusError>> {
        let mut results = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                results.push(Err(CorpusError::NotFound(root.clone())));
                continue;
            }

            // A root that is itself a file bypasses the extension filter:
            // the caller named it explicitly.
            if root.is_file() {
                results.push(Ok(root.clone()));
                continue;
            }

            let gitignore = self.build_gitignore(root);

            let iter = WalkDir::new(root)
                .follow_links(self.config.follow_symlinks)
                .sort_by_file_name();

            for entry in iter {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        results.push(Err(CorpusError::Walk {
                            root: root.clone(),
                            message: e.to_string(),
                        }));
                        continue;
                    }
                };

                let path = entry.path();
                let is_dir = entry.file_type().is_dir();

                if self.config.skip_hidden && is_hidden(root, path) {
                    log::trace!("Skipping hidden entry: {}", path.display());
                    continue;
                }

                if self.should_ignore(root, path, is_dir, &gitignore) {
                    log::trace!("Ignored by pattern: {}", path.display());
                    continue;
                }

                if is_dir {
                    continue;
                }

                if !self.has_document_extension(path) {
                    continue;
                }

                if !self.passes_regex_filter(path) {
                    continue;
                }

                results.push(Ok(path.to_path_buf()));
            }
        }

        log::debug!(
            "Walk complete: {} candidates from {} root(s)",
            results.iter().filter(|r| r.is_ok()).count(),
            self.roots.len()
        );

        results
    }

    /// Build gitignore matcher from config patterns and a root's .gitignore.
    fn build_gitignore(&self, root: &Path) -> Option<Gitignore> {
        let mut builder = GitignoreBuilder::new(root);

        // Add local .gitignore if it exists
        let gitignore_path = root.join(".gitignore");
        if gitignore_path.exists() {
            if let Some(e) = builder.add(&gitignore_path) {
                log::warn!(
                    "Failed to load .gitignore from {}: {}",
                    gitignore_path.display(),
                    e
                );
            } else {
                log::debug!("Loaded .gitignore from {}", gitignore_path.display());
            }
        }

        // Add custom patterns from config
        for pattern in &self.config.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        match builder.build() {
            Ok(gitignore) => {
                if gitignore.is_empty() {
                    None
                } else {
                    Some(gitignore)
                }
            }
            Err(e) => {
                log::warn!("Failed to build ignore patterns: {}", e);
                None
            }
        }
    }

    /// Check if a path should be ignored based on configured patterns.
    fn should_ignore(
        &self,
        root: &Path,
        path: &Path,
        is_dir: bool,
        gitignore: &Option<Gitignore>,
    ) -> bool {
        if let Some(gi) = gitignore {
            // Gitignore matching expects paths relative to the root with
            // forward slashes, even on Windows.
            let relative_path = path.strip_prefix(root).unwrap_or(path);
            let path_str = relative_path.to_string_lossy();
            let normalized_path = if cfg!(windows) {
                path_str.replace('\\', "/")
            } else {
                path_str.into_owned()
            };

            gi.matched(normalized_path, is_dir).is_ignore()
        } else {
            false
        }
    }

    /// Check if a file has one of the configured document extensions.
    fn has_document_extension(&self, path: &Path) -> bool {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.config.extensions.iter().any(|e| *e == extension)
    }

    /// Check if a file passes the filename regex filters.
    fn passes_regex_filter(&self, path: &Path) -> bool {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        // If include patterns are specified, at least one must match
        if !self.config.regex_include.is_empty()
            && !self
                .config
                .regex_include
                .iter()
                .any(|re| re.is_match(&filename))
        {
            return false;
        }

        // If exclude patterns are specified, none must match
        !self
            .config
            .regex_exclude
            .iter()
            .any(|re| re.is_match(&filename))
    }
}

/// Check whether any component below the root starts with a dot.
fn is_hidden(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| {
        c.as_os_str()
            .to_string_lossy()
            .starts_with('.')
    })
}
