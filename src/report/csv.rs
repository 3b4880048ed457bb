//! CSV output formatter for scan reports.
//!
//! Provides machine-readable CSV output for spreadsheets and data analysis.
//! One row is generated for each member of each duplicate group.
//!
//! # Columns
//!
//! - `group_id`: Numeric ID identifying the duplicate group
//! - `key`: Comparison key (hexadecimal)
//! - `role`: `canonical` or `redundant`
//! - `path`: Path of the owning document
//! - `heading`: Heading of the group's canonical section
//! - `line`: 1-based line number of the section heading
//! - `bytes`: Section size in bytes

use std::io;

use serde::Serialize;
use thiserror::Error;

use super::{Report, ReportLocation};

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    /// Unique identifier for the duplicate group
    group_id: usize,
    /// Comparison key (hex)
    key: &'a str,
    /// Whether this row is the canonical copy
    role: &'static str,
    /// Path of the owning document
    path: &'a str,
    /// Heading of the group's canonical section
    heading: &'a str,
    /// 1-based heading line number
    line: usize,
    /// Section size in bytes
    bytes: usize,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a Report,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (idx, group) in self.report.groups.iter().enumerate() {
            let group_id = idx + 1;

            let row = |role: &'static str, location: &'a ReportLocation| CsvRow {
                group_id,
                key: &group.key,
                role,
                path: &location.path,
                heading: &group.heading,
                line: location.line,
                bytes: location.bytes,
            };

            csv_writer.serialize(row("canonical", &group.canonical))?;
            for copy in &group.redundant {
                csv_writer.serialize(row("redundant", copy))?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn render(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
