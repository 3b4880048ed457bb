//! Section text normalization and comparison keys.
//!
//! # Overview
//!
//! Duplicate detection never compares raw section text. Each section is
//! reduced to a canonical form — NFC-normalized, lower-cased, ASCII
//! punctuation stripped (which removes Markdown emphasis markers along with
//! the rest), whitespace runs collapsed to single spaces — and two values
//! are derived from it:
//!
//! - a 32-byte BLAKE3 **key**: equal keys mean exact (normalized) duplicates
//! - a 64-bit SimHash **fingerprint**: small Hamming distance means the
//!   sections are near-duplicates
//!
//! The transform is pure: the same section always yields the same key.

use unicode_normalization::UnicodeNormalization;

use super::segmenter::Section;

/// Comparison key for a normalized section (BLAKE3, 32 bytes).
pub type Key = [u8; 32];

/// Derived comparison form of a section.
///
/// Transient by design: computed during a scan, used to build groups, then
/// discarded with the scan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedSection {
    /// Exact-match key over the normalized text
    pub key: Key,
    /// SimHash fingerprint of the normalized text
    pub fingerprint: u64,
    /// Length of the normalized text in bytes
    pub len: usize,
}

/// Reduce text to its canonical comparison form.
///
/// Steps, in order: Unicode NFC normalization, lowercasing, dropping ASCII
/// punctuation, collapsing whitespace runs to single spaces. Deterministic
/// and idempotent.
///
/// # Example
///
/// ```
/// use sectdupe::dedupe::normalize_text;
///
/// let a = normalize_text("What  is *Kotlin*?");
/// let b = normalize_text("what is kotlin");
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.nfc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compute the comparison key and fingerprint for a section.
///
/// # Arguments
///
/// * `section` - The section to normalize
#[must_use]
pub fn normalize_section(section: &Section) -> NormalizedSection {
    let normalized = normalize_text(&section.text());
    NormalizedSection {
        key: *blake3::hash(normalized.as_bytes()).as_bytes(),
        fingerprint: simhash::simhash(&normalized),
        len: normalized.len(),
    }
}

/// Render a key as lowercase hexadecimal.
#[must_use]
pub fn key_to_hex(key: &Key) -> String {
    key.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;
    use crate::dedupe::segment_document;
    use std::path::PathBuf;

    fn sections(text: &str) -> Vec<Section> {
        let doc = Document::new(PathBuf::from("/test.md"), text.to_string());
        segment_document(&doc).unwrap()
    }

    #[test]
    fn test_normalize_text_case_and_whitespace() {
        let input = "Hello, World! This is a TEST.   With multiple   spaces and \n newlines.";
        let expected = "hello world this is a test with multiple spaces and newlines";
        assert_eq!(normalize_text(input), expected);
    }

    #[test]
    fn test_normalize_text_strips_emphasis_markers() {
        assert_eq!(
            normalize_text("**bold** and _italic_ and `code`"),
            normalize_text("bold and italic and code")
        );
    }

    #[test]
    fn test_normalize_text_idempotent() {
        let once = normalize_text("What *is* a   coroutine?");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn test_normalize_text_nfc_forms_agree() {
        // U+00E9 vs e + U+0301 (combining acute)
        assert_eq!(normalize_text("caf\u{e9}"), normalize_text("cafe\u{301}"));
    }

    #[test]
    fn test_same_normalized_text_same_key() {
        let a = sections("# What is X?\nThe answer.\n");
        let b = sections("#   what  IS  x\n\nthe answer!\n");

        let ka = normalize_section(&a[0]);
        let kb = normalize_section(&b[0]);
        assert_eq!(ka.key, kb.key);
        assert_eq!(ka.fingerprint, kb.fingerprint);
    }

    #[test]
    fn test_different_text_different_key() {
        let a = sections("# What is X?\nFirst answer.\n");
        let b = sections("# What is Y?\nSecond answer.\n");

        assert_ne!(normalize_section(&a[0]).key, normalize_section(&b[0]).key);
    }

    #[test]
    fn test_normalize_section_deterministic() {
        let s = sections("# Heading\nSome body text here.\n");
        assert_eq!(normalize_section(&s[0]), normalize_section(&s[0]));
    }

    #[test]
    fn test_near_duplicates_have_close_fingerprints() {
        let body_a = "Install the toolchain with the version pinned in the manifest and run \
                      the full build once on a clean checkout to verify everything works.";
        let body_b = "Install the toolchain with the version pinned in the manifest and run \
                      the full build twice on a clean checkout to verify everything works.";
        let a = sections(&format!("# Setup\n{}\n", body_a));
        let b = sections(&format!("# Setup\n{}\n", body_b));

        let fa = normalize_section(&a[0]).fingerprint;
        let fb = normalize_section(&b[0]).fingerprint;
        assert!(simhash::hamming_distance(fa, fb) <= 18);
    }

    #[test]
    fn test_key_to_hex() {
        let mut key = [0u8; 32];
        key[0] = 0xAB;
        key[31] = 0xEF;

        let hex = key_to_hex(&key);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("ab"));
        assert!(hex.ends_with("ef"));
    }
}
