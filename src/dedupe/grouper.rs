//! Duplicate grouping over normalized section keys.
//!
//! # Overview
//!
//! Grouping is a single ordered traversal: documents in caller order,
//! sections in document order. The first section seen with a given key
//! founds a group and becomes its canonical member; every later section
//! with the same key is appended as a redundant member. There is no other
//! tie-break — traversal order decides everything.
//!
//! An optional second pass merges groups whose SimHash fingerprints are
//! within a configured Hamming distance, for near-duplicate detection.
//!
//! # Example
//!
//! ```
//! use sectdupe::corpus::Document;
//! use sectdupe::dedupe::{build_groups, segment_document, SegmentedDocument};
//! use std::path::PathBuf;
//!
//! let doc = Document::new(
//!     PathBuf::from("a.md"),
//!     "# Q\nanswer\n# Q\nanswer\n".to_string(),
//! );
//! let segmented = SegmentedDocument::from_sections(
//!     doc.path.clone(),
//!     segment_document(&doc).unwrap(),
//! );
//!
//! let (groups, stats) = build_groups(&[segmented]);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].members.len(), 2);
//! assert_eq!(stats.redundant_sections, 1);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use super::normalizer::{key_to_hex, normalize_section, Key, NormalizedSection};
use super::segmenter::Section;

/// A document after segmentation and normalization.
///
/// Sections stay owned here; groups refer to them by index.
#[derive(Debug, Clone)]
pub struct SegmentedDocument {
    /// Path of the source document
    pub path: PathBuf,
    /// Sections in document order, each paired with its comparison form
    pub sections: Vec<(Section, NormalizedSection)>,
}

impl SegmentedDocument {
    /// Normalize a section list into a segmented document.
    #[must_use]
    pub fn from_sections(path: PathBuf, sections: Vec<Section>) -> Self {
        let sections = sections
            .into_iter()
            .map(|s| {
                let normalized = normalize_section(&s);
                (s, normalized)
            })
            .collect();
        Self { path, sections }
    }

    /// Number of sections in this document.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

/// A group member: where one copy of the content lives.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SectionRef {
    /// Index of the owning document in traversal order
    pub doc_index: usize,
    /// Index of the section within its document
    pub section_index: usize,
    /// Path of the owning document
    pub path: PathBuf,
    /// Section heading (empty for a preamble section)
    pub heading: String,
    /// 1-based line number of the heading
    pub line: usize,
    /// Section size in bytes of source text
    pub bytes: usize,
}

/// Sections judged equivalent, with one canonical representative.
///
/// `members[0]` is always the canonical section: the first one encountered
/// in traversal order, which is also the member with the smallest
/// (document order, section order) pair.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// Comparison key the group was founded on
    pub key: Key,
    /// SimHash fingerprint of the founding member
    pub fingerprint: u64,
    /// Members in traversal order, canonical first
    pub members: Vec<SectionRef>,
}

impl DuplicateGroup {
    /// The canonical member.
    ///
    /// # Panics
    ///
    /// Groups are never constructed empty; this indexes `members[0]`.
    #[must_use]
    pub fn canonical(&self) -> &SectionRef {
        &self.members[0]
    }

    /// The redundant members (everything after the canonical one).
    #[must_use]
    pub fn redundant(&self) -> &[SectionRef] {
        &self.members[1..]
    }

    /// Number of members in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this group is empty (it never is in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether this group has redundant copies.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.members.len() > 1
    }

    /// Bytes occupied by the redundant copies.
    #[must_use]
    pub fn redundant_bytes(&self) -> u64 {
        self.redundant().iter().map(|m| m.bytes as u64).sum()
    }

    /// Key as hexadecimal string.
    #[must_use]
    pub fn key_hex(&self) -> String {
        key_to_hex(&self.key)
    }
}

/// Statistics from the grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Number of documents traversed
    pub total_documents: usize,
    /// Total sections across all documents
    pub total_sections: usize,
    /// Number of singleton groups (sections with no copy elsewhere)
    pub unique_sections: usize,
    /// Number of groups with 2+ members
    pub duplicate_groups: usize,
    /// Total redundant copies across all groups
    pub redundant_sections: usize,
    /// Bytes occupied by redundant copies
    pub redundant_bytes: u64,
}

impl GroupingStats {
    /// Recompute statistics from a final group list.
    ///
    /// Used after the fuzzy merge pass, which changes group membership.
    #[must_use]
    pub fn from_groups(total_documents: usize, groups: &[DuplicateGroup]) -> Self {
        let mut stats = Self {
            total_documents,
            ..Default::default()
        };
        for group in groups {
            stats.total_sections += group.len();
            if group.has_duplicates() {
                stats.duplicate_groups += 1;
                stats.redundant_sections += group.len() - 1;
                stats.redundant_bytes += group.redundant_bytes();
            } else {
                stats.unique_sections += 1;
            }
        }
        stats
    }

    /// Percentage of sections that are redundant copies.
    #[must_use]
    pub fn duplication_rate(&self) -> f64 {
        if self.total_sections == 0 {
            0.0
        } else {
            (self.redundant_sections as f64 / self.total_sections as f64) * 100.0
        }
    }
}

/// Group sections by normalized key across a document list.
///
/// # Arguments
///
/// * `docs` - Segmented documents in the caller's traversal order
///
/// # Returns
///
/// A tuple of:
/// - `Vec<DuplicateGroup>` - Every section's group, ordered by first
///   appearance; singleton groups included
/// - `GroupingStats` - Statistics about the grouping
///
/// # Performance
///
/// O(total section count) expected time via a hash map from key to group
/// index. No I/O.
#[must_use]
pub fn build_groups(docs: &[SegmentedDocument]) -> (Vec<DuplicateGroup>, GroupingStats) {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut by_key: HashMap<Key, usize> = HashMap::new();

    for (doc_index, doc) in docs.iter().enumerate() {
        for (section_index, (section, normalized)) in doc.sections.iter().enumerate() {
            let member = SectionRef {
                doc_index,
                section_index,
                path: doc.path.clone(),
                heading: section.heading.clone(),
                line: section.line,
                bytes: section.byte_len(),
            };

            match by_key.get(&normalized.key).copied() {
                Some(idx) => {
                    log::trace!(
                        "Redundant section {}:{} joins group {}",
                        member.path.display(),
                        member.line,
                        idx
                    );
                    groups[idx].members.push(member);
                }
                None => {
                    by_key.insert(normalized.key, groups.len());
                    groups.push(DuplicateGroup {
                        key: normalized.key,
                        fingerprint: normalized.fingerprint,
                        members: vec![member],
                    });
                }
            }
        }
    }

    let stats = GroupingStats::from_groups(docs.len(), &groups);
    log::info!(
        "Grouping complete: {} sections → {} duplicate group(s), {} redundant ({:.1}% duplication)",
        stats.total_sections,
        stats.duplicate_groups,
        stats.redundant_sections,
        stats.duplication_rate()
    );

    (groups, stats)
}

/// Merge groups whose fingerprints are within `max_distance` bits.
///
/// Groups are considered in first-appearance order; a later group folds
/// into the earliest group that is close enough, so the merge is
/// deterministic. Members of a merged group are re-sorted by
/// (document order, section order), which keeps the canonical member the
/// smallest one.
///
/// # Arguments
///
/// * `groups` - Exact groups from [`build_groups`]
/// * `max_distance` - Maximum Hamming distance between fingerprints
///
/// # Returns
///
/// A tuple of the merged groups and the number of groups folded away.
#[must_use]
pub fn merge_similar(
    groups: Vec<DuplicateGroup>,
    max_distance: u32,
) -> (Vec<DuplicateGroup>, usize) {
    let mut merged: Vec<DuplicateGroup> = Vec::new();
    let mut folded = 0usize;

    for group in groups {
        let target = merged.iter_mut().find(|g| {
            simhash::hamming_distance(g.fingerprint, group.fingerprint) <= max_distance
        });
        match target {
            Some(existing) => {
                log::debug!(
                    "Near-duplicate merge: \"{}\" folds into \"{}\"",
                    group.canonical().heading,
                    existing.canonical().heading
                );
                existing.members.extend(group.members);
                folded += 1;
            }
            None => merged.push(group),
        }
    }

    for group in &mut merged {
        group
            .members
            .sort_by_key(|m| (m.doc_index, m.section_index));
    }

    if folded > 0 {
        log::info!("Fuzzy pass folded {} group(s)", folded);
    }

    (merged, folded)
}
