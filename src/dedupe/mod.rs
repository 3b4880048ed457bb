//! Duplicate section detection pipeline.
//!
//! Segment → Normalize → Group → (optional) Merge, as a single-pass batch
//! over a document list. See [`detector::DuplicateDetector`] for the
//! orchestrator and [`grouper::build_groups`] for the grouping rules.

pub mod detector;
pub mod grouper;
pub mod normalizer;
pub mod segmenter;

pub use detector::{DetectorConfig, DetectorError, DuplicateDetector, ScanSummary};
pub use grouper::{
    build_groups, merge_similar, DuplicateGroup, GroupingStats, SectionRef, SegmentedDocument,
};
pub use normalizer::{key_to_hex, normalize_section, normalize_text, Key, NormalizedSection};
pub use segmenter::{segment_document, Section, SegmentError};
