//! Document loading.
//!
//! A [`Document`] pairs a path with the raw UTF-8 text read from it. Loading
//! is the only file I/O the pipeline performs; everything downstream works on
//! the in-memory text.

use std::fs;
use std::path::{Path, PathBuf};

use super::CorpusError;

/// A loaded text document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path the text was read from
    pub path: PathBuf,
    /// Raw document text
    pub text: String,
}

impl Document {
    /// Create a document from already-loaded text.
    ///
    /// Useful in tests and for callers that source text elsewhere.
    #[must_use]
    pub fn new(path: PathBuf, text: String) -> Self {
        Self { path, text }
    }

    /// Load a document's text from disk.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the document file
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::NotText`] if the file is not valid UTF-8, or
    /// [`CorpusError::Io`] for any other read failure.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::new(path.to_path_buf(), text)),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                Err(CorpusError::NotText(path.to_path_buf()))
            }
            Err(e) => Err(CorpusError::io(path.to_path_buf(), e)),
        }
    }

    /// Size of the document text in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}
