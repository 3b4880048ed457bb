//! Duplicate detection pipeline orchestrator.
//!
//! # Overview
//!
//! This module runs the full pipeline:
//! 1. **Walk** - Collect candidate documents in a stable order
//! 2. **Segment** - Load each document and split it into sections,
//!    computing comparison keys (parallel, per document)
//! 3. **Group** - Build duplicate groups over the keys (serial)
//! 4. **Merge** - Optionally fold near-duplicate groups together
//!
//! Per-document failures (empty document, unreadable file) are recorded in
//! the summary and the batch continues; `strict` mode promotes the first
//! failure to a fatal error.
//!
//! # Example
//!
//! ```no_run
//! use sectdupe::dedupe::DuplicateDetector;
//! use std::path::PathBuf;
//!
//! let detector = DuplicateDetector::with_defaults();
//! let (groups, summary) = detector.scan(vec![PathBuf::from("docs")]).unwrap();
//!
//! println!("Found {} duplicate groups", summary.duplicate_groups);
//! println!("Redundant text: {}", summary.redundant_display());
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::corpus::{CorpusError, Document, Walker, WalkerConfig};
use crate::progress::ProgressCallback;

use super::grouper::{build_groups, merge_similar, DuplicateGroup, SegmentedDocument};
use super::segmenter::{segment_document, SegmentError};

/// Errors that can occur while processing a document.
///
/// In non-strict mode these are recorded per document in the
/// [`ScanSummary`]; in strict mode the first one aborts the scan.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DetectorError {
    /// Discovery or loading failed.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// Segmentation rejected the document.
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Configuration for the duplicate detector.
#[derive(Clone)]
pub struct DetectorConfig {
    /// Walker configuration for document discovery.
    pub walker_config: WalkerConfig,
    /// Fail on the first per-document error instead of recording it.
    pub strict: bool,
    /// Maximum SimHash Hamming distance for near-duplicate merging.
    /// `None` disables the fuzzy pass (exact grouping only).
    pub fuzzy_distance: Option<u32>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for DetectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorConfig")
            .field("walker_config", &self.walker_config)
            .field("strict", &self.strict)
            .field("fuzzy_distance", &self.fuzzy_distance)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            strict: false,
            fuzzy_distance: None,
            progress_callback: None,
        }
    }
}

impl DetectorConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set fail-fast on any per-document error.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable the near-duplicate merge pass with the given bit distance.
    #[must_use]
    pub fn with_fuzzy_distance(mut self, distance: Option<u32>) -> Self {
        self.fuzzy_distance = distance;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Number of documents successfully processed
    pub total_documents: usize,
    /// Number of documents skipped due to per-document errors
    pub skipped_documents: usize,
    /// Total sections across processed documents
    pub total_sections: usize,
    /// Sections with no copy anywhere (singleton groups)
    pub unique_sections: usize,
    /// Number of groups with 2+ members
    pub duplicate_groups: usize,
    /// Total redundant copies across all groups
    pub redundant_sections: usize,
    /// Bytes occupied by redundant copies
    pub redundant_bytes: u64,
    /// Number of groups folded by the fuzzy pass
    pub similar_merged: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Per-document errors encountered during the scan
    pub scan_errors: Vec<DetectorError>,
}

impl ScanSummary {
    /// Percentage of sections that are redundant copies.
    #[must_use]
    pub fn duplication_rate(&self) -> f64 {
        if self.total_sections == 0 {
            0.0
        } else {
            (self.redundant_sections as f64 / self.total_sections as f64) * 100.0
        }
    }

    /// Format redundant bytes as a human-readable string.
    #[must_use]
    pub fn redundant_display(&self) -> String {
        format_size(self.redundant_bytes)
    }
}

/// Format a byte size as a human-readable string.
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Duplicate detector that runs the scan pipeline.
///
/// # Example
///
/// ```no_run
/// use sectdupe::dedupe::{DetectorConfig, DuplicateDetector};
/// use std::path::PathBuf;
///
/// let config = DetectorConfig::default().with_fuzzy_distance(Some(3));
/// let detector = DuplicateDetector::new(config);
///
/// match detector.scan(vec![PathBuf::from("docs")]) {
///     Ok((groups, summary)) => {
///         println!("{} groups, {} redundant sections",
///             summary.duplicate_groups, summary.redundant_sections);
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
pub struct DuplicateDetector {
    config: DetectorConfig,
}

impl DuplicateDetector {
    /// Create a new detector with the given configuration.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Create a new detector with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DetectorConfig::default())
    }

    /// Scan the given roots for duplicate sections.
    ///
    /// Roots may be files or directories and are visited in the given
    /// order; that order, together with the walker's sorted traversal,
    /// defines which copy of duplicated content is canonical.
    ///
    /// # Arguments
    ///
    /// * `roots` - Files or directories to scan
    ///
    /// # Returns
    ///
    /// A tuple of:
    /// - `Vec<DuplicateGroup>` - Every section's group, ordered by first
    ///   appearance (singletons included)
    /// - `ScanSummary` - Statistics about the scan
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first per-document error. Otherwise
    /// errors are recorded in the summary and the scan always succeeds.
    pub fn scan(
        &self,
        roots: Vec<PathBuf>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), DetectorError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        log::info!("Scanning {} root(s) for duplicate sections", roots.len());

        // Phase 1: Walk roots and collect candidate paths
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("walking", 0);
        }

        let walker = Walker::new(roots, self.config.walker_config.clone());
        let mut paths = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(path) => paths.push(path),
                Err(e) => {
                    if self.config.strict {
                        return Err(e.into());
                    }
                    log::warn!("{}", e);
                    summary.scan_errors.push(e.into());
                }
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("walking");
        }

        log::info!("Found {} candidate document(s)", paths.len());

        // Phase 2: Load and segment documents in parallel.
        // Order-preserving collect keeps traversal order, so the shared
        // group map in phase 3 sees documents exactly as walked.
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("segmenting", paths.len());
        }

        let results: Vec<Result<SegmentedDocument, DetectorError>> = paths
            .into_par_iter()
            .enumerate()
            .map(|(idx, path)| {
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_progress(idx + 1, path.to_string_lossy().as_ref());
                }
                let doc = Document::load(&path)?;
                let sections = segment_document(&doc)?;
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_item_completed(doc.byte_len() as u64);
                }
                Ok(SegmentedDocument::from_sections(doc.path, sections))
            })
            .collect();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("segmenting");
        }

        let mut docs = Vec::new();
        for result in results {
            match result {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    if self.config.strict {
                        return Err(e);
                    }
                    log::warn!("Skipping document: {}", e);
                    summary.skipped_documents += 1;
                    summary.scan_errors.push(e);
                }
            }
        }

        // Phase 3: Group by key, then optionally merge near-duplicates
        let (mut groups, _) = build_groups(&docs);

        if let Some(distance) = self.config.fuzzy_distance {
            let (merged, folded) = merge_similar(groups, distance);
            groups = merged;
            summary.similar_merged = folded;
        }

        let stats = super::grouper::GroupingStats::from_groups(docs.len(), &groups);
        summary.total_documents = stats.total_documents;
        summary.total_sections = stats.total_sections;
        summary.unique_sections = stats.unique_sections;
        summary.duplicate_groups = stats.duplicate_groups;
        summary.redundant_sections = stats.redundant_sections;
        summary.redundant_bytes = stats.redundant_bytes;
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} document(s), {} section(s), {} duplicate group(s), {} redundant ({})",
            summary.total_documents,
            summary.total_sections,
            summary.duplicate_groups,
            summary.redundant_sections,
            summary.redundant_display()
        );

        Ok((groups, summary))
    }

    /// Run the pipeline over pre-loaded documents.
    ///
    /// Use this when text comes from another source than the filesystem.
    /// Document order is the order of the input vector.
    ///
    /// # Arguments
    ///
    /// * `documents` - Loaded documents, in the caller's order
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first per-document error.
    pub fn scan_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), DetectorError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        let results: Vec<Result<SegmentedDocument, DetectorError>> = documents
            .into_par_iter()
            .map(|doc| {
                let sections = segment_document(&doc)?;
                Ok(SegmentedDocument::from_sections(doc.path, sections))
            })
            .collect();

        let mut docs = Vec::new();
        for result in results {
            match result {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    if self.config.strict {
                        return Err(e);
                    }
                    log::warn!("Skipping document: {}", e);
                    summary.skipped_documents += 1;
                    summary.scan_errors.push(e);
                }
            }
        }

        let (mut groups, _) = build_groups(&docs);

        if let Some(distance) = self.config.fuzzy_distance {
            let (merged, folded) = merge_similar(groups, distance);
            groups = merged;
            summary.similar_merged = folded;
        }

        let stats = super::grouper::GroupingStats::from_groups(docs.len(), &groups);
        summary.total_documents = stats.total_documents;
        summary.total_sections = stats.total_sections;
        summary.unique_sections = stats.unique_sections;
        summary.duplicate_groups = stats.duplicate_groups;
        summary.redundant_sections = stats.redundant_sections;
        summary.redundant_bytes = stats.redundant_bytes;
        summary.scan_duration = start_time.elapsed();

        Ok((groups, summary))
    }
}
