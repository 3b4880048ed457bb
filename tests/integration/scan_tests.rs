use sectdupe::corpus::WalkerConfig;
use sectdupe::dedupe::{DetectorConfig, DuplicateDetector};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write_doc(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let detector = DuplicateDetector::with_defaults();

    let (groups, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_documents, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_sections() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.md", "# Alpha\nfirst\n");
    write_doc(dir.path(), "b.md", "# Beta\nsecond\n");
    write_doc(dir.path(), "c.md", "# Gamma\nthird\n");

    let detector = DuplicateDetector::with_defaults();
    let (groups, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(summary.total_documents, 3);
    assert_eq!(summary.total_sections, 3);
    assert_eq!(summary.duplicate_groups, 0);
    assert!(groups.iter().all(|g| !g.has_duplicates()));
}

#[test]
fn test_scan_identical_sections_across_files() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "a.md",
        "# What is X?\nX is the thing we keep explaining.\n",
    );
    write_doc(
        dir.path(),
        "b.md",
        "# What is X?\nX is the thing we keep explaining.\n",
    );
    write_doc(dir.path(), "c.md", "# Something else\nUnrelated.\n");

    let detector = DuplicateDetector::with_defaults();
    let (groups, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.redundant_sections, 1);

    let dup = groups.iter().find(|g| g.has_duplicates()).unwrap();
    assert_eq!(dup.len(), 2);
    assert!(dup.canonical().path.ends_with("a.md"));
    assert!(dup.redundant()[0].path.ends_with("b.md"));
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "top.md", "# Shared\nrepeated body\n");
    write_doc(dir.path(), "nested/deep/inner.md", "# Shared\nrepeated body\n");

    let detector = DuplicateDetector::with_defaults();
    let (groups, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(summary.total_documents, 2);
    assert_eq!(groups.iter().filter(|g| g.has_duplicates()).count(), 1);
}

#[test]
fn test_scan_normalization_bridges_formatting() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.md", "# What is X?\nThe **answer**.\n");
    write_doc(dir.path(), "b.md", "#   WHAT IS X\n\nthe answer!\n");

    let detector = DuplicateDetector::with_defaults();
    let (_, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(summary.duplicate_groups, 1);
}

#[test]
fn test_scan_empty_document_does_not_abort_batch() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.md", "# Pair\nsame body\n");
    write_doc(dir.path(), "m.md", "  \n\t\n");
    write_doc(dir.path(), "z.md", "# Pair\nsame body\n");

    let detector = DuplicateDetector::with_defaults();
    let (groups, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(summary.total_documents, 2);
    assert_eq!(summary.skipped_documents, 1);
    assert_eq!(summary.scan_errors.len(), 1);
    assert_eq!(groups.iter().filter(|g| g.has_duplicates()).count(), 1);
}

#[test]
fn test_scan_strict_mode_aborts_on_empty_document() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.md", "# Fine\nbody\n");
    write_doc(dir.path(), "bad.md", "\n");

    let detector = DuplicateDetector::new(DetectorConfig::default().with_strict(true));
    assert!(detector.scan(vec![dir.path().to_path_buf()]).is_err());
}

#[test]
fn test_scan_twice_yields_identical_groupings() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.md", "# Q1\nanswer one\n# Q2\nanswer two\n");
    write_doc(dir.path(), "b.md", "# Q2\nanswer two\n# Q3\nanswer three\n");
    write_doc(dir.path(), "sub/c.md", "# Q1\nanswer one\n");

    let detector = DuplicateDetector::with_defaults();
    let (first, _) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();
    let (second, _) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.key, b.key);
        assert_eq!(a.members, b.members);
    }
}

#[test]
fn test_scan_canonical_follows_root_order() {
    let dir = tempdir().unwrap();
    let zlast = dir.path().join("z-preferred");
    let afirst = dir.path().join("a-other");
    write_doc(&zlast, "doc.md", "# Shared\nbody text\n");
    write_doc(&afirst, "doc.md", "# Shared\nbody text\n");

    // z-preferred listed first, so its copy must be canonical despite
    // sorting after a-other lexicographically.
    let detector = DuplicateDetector::with_defaults();
    let (groups, _) = detector.scan(vec![zlast.clone(), afirst]).unwrap();

    let dup = groups.iter().find(|g| g.has_duplicates()).unwrap();
    assert!(dup.canonical().path.starts_with(&zlast));
}

#[test]
fn test_scan_respects_walker_filters() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "keep.md", "# S\nbody\n");
    write_doc(dir.path(), "skip.txt", "# S\nbody\n");

    let config = DetectorConfig::default().with_walker_config(WalkerConfig {
        extensions: vec!["md".to_string()],
        ..Default::default()
    });
    let detector = DuplicateDetector::new(config);
    let (_, summary) = detector.scan(vec![dir.path().to_path_buf()]).unwrap();

    assert_eq!(summary.total_documents, 1);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_fuzzy_groups_near_duplicates() {
    let dir = tempdir().unwrap();
    let body_a = "Run the linter and the formatter before every commit so the diff stays \
                  small and the review queue moves quickly for everyone involved.";
    let body_b = "Run the linter and the formatter before every commit so the diff stays \
                  small and the review queue moves quickly for everybody involved.";
    write_doc(dir.path(), "a.md", &format!("# Workflow\n{}\n", body_a));
    write_doc(dir.path(), "b.md", &format!("# Workflow\n{}\n", body_b));

    let exact = DuplicateDetector::with_defaults();
    let (_, summary) = exact.scan(vec![dir.path().to_path_buf()]).unwrap();
    assert_eq!(summary.duplicate_groups, 0);

    let fuzzy =
        DuplicateDetector::new(DetectorConfig::default().with_fuzzy_distance(Some(18)));
    let (groups, summary) = fuzzy.scan(vec![dir.path().to_path_buf()]).unwrap();
    assert_eq!(summary.similar_merged, 1);

    let dup = groups.iter().find(|g| g.has_duplicates()).unwrap();
    assert!(dup.canonical().path.ends_with("a.md"));
}
