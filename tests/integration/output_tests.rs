use sectdupe::corpus::Document;
use sectdupe::dedupe::DuplicateDetector;
use sectdupe::report::{CsvOutput, JsonOutput, Report, TextOutput};
use std::path::PathBuf;

fn build_report() -> Report {
    let docs = vec![
        Document::new(
            PathBuf::from("/docs/a.md"),
            "# What is X?\nAn answer.\n# Own\nunique body\n".to_string(),
        ),
        Document::new(
            PathBuf::from("/docs/b.md"),
            "# What is X?\nAn answer.\n".to_string(),
        ),
        Document::new(
            PathBuf::from("/docs/c.md"),
            "# What is X?\nAn answer.\n".to_string(),
        ),
    ];

    let detector = DuplicateDetector::with_defaults();
    let (groups, summary) = detector.scan_documents(docs).unwrap();
    Report::new(&groups, &summary)
}

#[test]
fn test_report_structure() {
    let report = build_report();

    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.heading, "What is X?");
    assert_eq!(group.copies, 3);
    assert_eq!(group.canonical.path, "/docs/a.md");
    assert_eq!(group.redundant.len(), 2);
    assert_eq!(report.summary.total_sections, 4);
}

#[test]
fn test_json_and_text_agree_on_locations() {
    let report = build_report();

    let json = JsonOutput::new(&report).to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let text = TextOutput::new(&report).render().unwrap();

    let canonical = parsed["groups"][0]["canonical"]["path"].as_str().unwrap();
    assert_eq!(canonical, "/docs/a.md");
    assert!(text.contains(canonical));
    for copy in parsed["groups"][0]["redundant"].as_array().unwrap() {
        assert!(text.contains(copy["path"].as_str().unwrap()));
    }
}

#[test]
fn test_csv_row_per_member() {
    let report = build_report();

    let csv = CsvOutput::new(&report).render().unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    // Header + 3 members of the one duplicate group
    assert_eq!(lines.len(), 4);
    assert_eq!(lines.iter().filter(|l| l.contains("canonical")).count(), 1);
    assert_eq!(lines.iter().filter(|l| l.contains("redundant")).count(), 2);
}

#[test]
fn test_formatters_are_pure() {
    let report = build_report();

    let json1 = JsonOutput::new(&report).to_json().unwrap();
    let json2 = JsonOutput::new(&report).to_json().unwrap();
    assert_eq!(json1, json2);

    let csv1 = CsvOutput::new(&report).render().unwrap();
    let csv2 = CsvOutput::new(&report).render().unwrap();
    assert_eq!(csv1, csv2);
}
