//! JSON output formatter for scan reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "generated_at": "2026-01-01T00:00:00Z",
//!   "groups": [
//!     {
//!       "key": "abc123...",
//!       "heading": "What is X?",
//!       "copies": 2,
//!       "canonical": {"path": "docs/a.md", "line": 10, "bytes": 240},
//!       "redundant": [{"path": "docs/b.md", "line": 44, "bytes": 240}]
//!     }
//!   ],
//!   "summary": {
//!     "total_documents": 12,
//!     "total_sections": 98,
//!     "duplicate_groups": 3,
//!     "redundant_sections": 5,
//!     "redundant_bytes": 2140,
//!     "scan_duration_ms": 12,
//!     "errors": []
//!   }
//! }
//! ```

use std::io::Write;

use super::Report;

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON output formatter.
pub struct JsonOutput<'a> {
    report: &'a Report,
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output formatter.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.report)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.report)
    }

    /// Write JSON to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    /// * `pretty` - Whether to pretty-print the output
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
