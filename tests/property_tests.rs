use proptest::prelude::*;
use sectdupe::corpus::Document;
use sectdupe::dedupe::{build_groups, normalize_text, segment_document, SegmentedDocument};
use std::path::PathBuf;

/// Build a segmented document from a list of section bodies.
fn doc_from_bodies(path: &str, bodies: &[String]) -> SegmentedDocument {
    let mut text = String::new();
    for body in bodies {
        text.push_str("# Section\n");
        text.push_str(body);
        text.push('\n');
    }
    let doc = Document::new(PathBuf::from(path), text);
    SegmentedDocument::from_sections(doc.path.clone(), segment_document(&doc).unwrap())
}

proptest! {
    #[test]
    fn test_normalize_is_deterministic(text in "\\PC*") {
        prop_assert_eq!(normalize_text(&text), normalize_text(&text));
    }

    #[test]
    fn test_normalize_is_idempotent(text in "[a-zA-Z0-9 \\t,.;:!?*_`#éüñß-]{0,80}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }

    #[test]
    fn test_normalize_collapses_whitespace_variants(words in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let single = words.join(" ");
        let messy = words.join("  \t ");
        prop_assert_eq!(normalize_text(&single), normalize_text(&messy));
    }

    #[test]
    fn test_normalize_is_case_insensitive(text in "[a-zA-Z ]{0,60}") {
        prop_assert_eq!(
            normalize_text(&text.to_uppercase()),
            normalize_text(&text.to_lowercase())
        );
    }

    #[test]
    fn test_grouping_invariants(
        bodies in prop::collection::vec(
            prop::sample::select(vec!["alpha", "beta", "gamma", "delta"]),
            1..20,
        )
    ) {
        let bodies: Vec<String> = bodies.iter().map(|s| s.to_string()).collect();
        let mid = bodies.len() / 2;
        let mut docs: Vec<SegmentedDocument> = Vec::new();
        if !bodies[..mid].is_empty() {
            docs.push(doc_from_bodies("/a.md", &bodies[..mid]));
        }
        if !bodies[mid..].is_empty() {
            docs.push(doc_from_bodies("/b.md", &bodies[mid..]));
        }

        let (groups, stats) = build_groups(&docs);

        // Every section lands in exactly one group
        let member_total: usize = groups.iter().map(|g| g.len()).sum();
        let section_total: usize = docs.iter().map(|d| d.section_count()).sum();
        prop_assert_eq!(member_total, section_total);
        prop_assert_eq!(stats.total_sections, section_total);

        // Members of a group all share the founding key; the canonical
        // member is the traversal-smallest
        for group in &groups {
            let canonical = group.canonical();
            for member in group.redundant() {
                prop_assert!(
                    (canonical.doc_index, canonical.section_index)
                        < (member.doc_index, member.section_index)
                );
            }
        }

        // Group order is first-appearance order
        for pair in groups.windows(2) {
            let a = (pair[0].canonical().doc_index, pair[0].canonical().section_index);
            let b = (pair[1].canonical().doc_index, pair[1].canonical().section_index);
            prop_assert!(a < b);
        }
    }

    #[test]
    fn test_grouping_is_idempotent(
        bodies in prop::collection::vec(
            prop::sample::select(vec!["one", "two", "three"]),
            1..12,
        )
    ) {
        let bodies: Vec<String> = bodies.iter().map(|s| s.to_string()).collect();
        let docs = vec![doc_from_bodies("/a.md", &bodies)];

        let (first, _) = build_groups(&docs);
        let (second, _) = build_groups(&docs);

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(a.key, b.key);
            prop_assert_eq!(&a.members, &b.members);
        }
    }
}
