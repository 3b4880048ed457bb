//! Report construction and output formatters.
//!
//! [`Report`] is the pure result value of a scan: for every group with more
//! than one member, the canonical location and all redundant locations,
//! plus summary statistics. Formatters render the same value three ways:
//! - [`text`]: human-readable terminal output
//! - [`json`]: machine-readable JSON for scripting
//! - [`csv`]: CSV rows for spreadsheets
//!
//! # Example
//!
//! ```no_run
//! use sectdupe::dedupe::DuplicateDetector;
//! use sectdupe::report::{JsonOutput, Report};
//! use std::path::PathBuf;
//!
//! let detector = DuplicateDetector::with_defaults();
//! let (groups, summary) = detector.scan(vec![PathBuf::from("docs")]).unwrap();
//!
//! let report = Report::new(&groups, &summary);
//! println!("{}", JsonOutput::new(&report).to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dedupe::{DuplicateGroup, ScanSummary, SectionRef};

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::TextOutput;

/// Where one copy of duplicated content lives.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportLocation {
    /// Path of the owning document
    pub path: String,
    /// 1-based line number of the section heading
    pub line: usize,
    /// Section size in bytes of source text
    pub bytes: usize,
}

impl ReportLocation {
    fn from_section_ref(member: &SectionRef) -> Self {
        Self {
            path: member.path.to_string_lossy().into_owned(),
            line: member.line,
            bytes: member.bytes,
        }
    }
}

/// One group of duplicated sections in the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportGroup {
    /// Comparison key as hexadecimal (64 characters)
    pub key: String,
    /// Heading of the canonical section (empty for a preamble section)
    pub heading: String,
    /// Total copies, canonical included
    pub copies: usize,
    /// The representative location
    pub canonical: ReportLocation,
    /// Locations of the redundant copies
    pub redundant: Vec<ReportLocation>,
}

/// Summary statistics carried alongside the groups.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Number of documents successfully processed
    pub total_documents: usize,
    /// Number of documents skipped due to per-document errors
    pub skipped_documents: usize,
    /// Total sections across processed documents
    pub total_sections: usize,
    /// Number of groups with 2+ members
    pub duplicate_groups: usize,
    /// Total redundant copies across all groups
    pub redundant_sections: usize,
    /// Bytes occupied by redundant copies
    pub redundant_bytes: u64,
    /// Percentage of sections that are redundant copies
    pub duplication_rate: f64,
    /// Number of groups folded by the fuzzy pass
    pub similar_merged: usize,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Messages for documents that could not be processed
    pub errors: Vec<String>,
}

/// The complete scan report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Groups with more than one member, in first-appearance order
    pub groups: Vec<ReportGroup>,
    /// Scan statistics
    pub summary: ReportSummary,
}

impl Report {
    /// Build a report from scan results.
    ///
    /// Pure transformation: singleton groups are dropped, everything else
    /// is carried over in first-appearance order.
    ///
    /// # Arguments
    ///
    /// * `groups` - All groups from the detector (singletons included)
    /// * `summary` - The scan summary
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary) -> Self {
        let report_groups = groups
            .iter()
            .filter(|g| g.has_duplicates())
            .map(|g| ReportGroup {
                key: g.key_hex(),
                heading: g.canonical().heading.clone(),
                copies: g.len(),
                canonical: ReportLocation::from_section_ref(g.canonical()),
                redundant: g
                    .redundant()
                    .iter()
                    .map(ReportLocation::from_section_ref)
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            groups: report_groups,
            summary: ReportSummary {
                total_documents: summary.total_documents,
                skipped_documents: summary.skipped_documents,
                total_sections: summary.total_sections,
                duplicate_groups: summary.duplicate_groups,
                redundant_sections: summary.redundant_sections,
                redundant_bytes: summary.redundant_bytes,
                duplication_rate: summary.duplication_rate(),
                similar_merged: summary.similar_merged,
                scan_duration_ms: summary.scan_duration.as_millis() as u64,
                errors: summary.scan_errors.iter().map(|e| e.to_string()).collect(),
            },
        }
    }

    /// Whether any duplicated content was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }
}
