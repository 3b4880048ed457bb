//! Heading-based document segmentation.
//!
//! # Overview
//!
//! This module splits a document's text into ordered [`Section`]s at ATX
//! heading lines (`#` through `######`). Each section records its heading,
//! body lines, and the byte range it occupies in the source document, so
//! later stages can report exact locations without re-reading files.
//!
//! Heading markers inside fenced code blocks (``` or ~~~) are treated as
//! body text, not boundaries. Content before the first heading becomes an
//! implicit preamble section with an empty heading.
//!
//! # Example
//!
//! ```
//! use sectdupe::corpus::Document;
//! use sectdupe::dedupe::segment_document;
//! use std::path::PathBuf;
//!
//! let doc = Document::new(
//!     PathBuf::from("qa.md"),
//!     "# What is X?\nAn answer.\n## Details\nMore.\n".to_string(),
//! );
//! let sections = segment_document(&doc).unwrap();
//!
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].heading, "What is X?");
//! assert_eq!(sections[1].level, 2);
//! ```

use std::ops::Range;
use std::path::PathBuf;

use crate::corpus::Document;

/// Errors raised by segmentation.
#[derive(thiserror::Error, Debug, Clone)]
pub enum SegmentError {
    /// The document contains nothing but whitespace.
    #[error("Document is empty: {0}")]
    EmptyDocument(PathBuf),
}

/// A heading-delimited block of text within a document.
///
/// Sections are owned by the per-document section list produced by
/// [`segment_document`]; the rest of the pipeline refers to them by
/// (document index, section index).
#[derive(Debug, Clone)]
pub struct Section {
    /// Heading text without markers; empty for the preamble
    pub heading: String,
    /// Heading level 1-6; 0 for the preamble
    pub level: u8,
    /// Body lines in document order, heading line excluded
    pub body: Vec<String>,
    /// Byte range of the whole section within the source text
    pub span: Range<usize>,
    /// 1-based line number of the heading (1 for the preamble)
    pub line: usize,
}

impl Section {
    /// Whether this is the implicit section before the first heading.
    #[must_use]
    pub fn is_preamble(&self) -> bool {
        self.level == 0
    }

    /// Size of the section in bytes of source text.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.span.len()
    }

    /// Heading and body joined into one comparison string.
    ///
    /// This is the input the normalizer works on; it is never shown to the
    /// user, so exact line joining does not matter beyond determinism.
    #[must_use]
    pub fn text(&self) -> String {
        if self.heading.is_empty() {
            self.body.join("\n")
        } else {
            let mut text = self.heading.clone();
            for line in &self.body {
                text.push('\n');
                text.push_str(line);
            }
            text
        }
    }
}

/// Section currently being accumulated during the line scan.
struct OpenSection {
    heading: String,
    level: u8,
    line: usize,
    start: usize,
    body: Vec<String>,
}

impl OpenSection {
    fn finish(self, end: usize) -> Section {
        Section {
            heading: self.heading,
            level: self.level,
            body: self.body,
            span: self.start..end,
            line: self.line,
        }
    }
}

/// Split a document into heading-delimited sections.
///
/// # Arguments
///
/// * `doc` - The loaded document to segment
///
/// # Returns
///
/// Sections in document order. Offsets and line numbers refer to the
/// original text, including the preamble section when the document has
/// non-blank content before its first heading.
///
/// # Errors
///
/// Returns [`SegmentError::EmptyDocument`] if the text is empty after
/// whitespace trimming.
pub fn segment_document(doc: &Document) -> Result<Vec<Section>, SegmentError> {
    if doc.text.trim().is_empty() {
        return Err(SegmentError::EmptyDocument(doc.path.clone()));
    }

    let mut sections = Vec::new();
    let mut current: Option<OpenSection> = None;
    let mut preamble: Vec<String> = Vec::new();
    let mut in_fence = false;

    for (line_no, start, line) in line_spans(&doc.text) {
        if !in_fence {
            if let Some((level, title)) = parse_heading(line) {
                match current.take() {
                    Some(open) => sections.push(open.finish(start)),
                    None => flush_preamble(&mut sections, &mut preamble, start),
                }
                current = Some(OpenSection {
                    heading: title.to_string(),
                    level,
                    line: line_no,
                    start,
                    body: Vec::new(),
                });
                continue;
            }
        }

        if is_fence(line) {
            in_fence = !in_fence;
        }

        match current.as_mut() {
            Some(open) => open.body.push(line.to_string()),
            None => preamble.push(line.to_string()),
        }
    }

    let end = doc.text.len();
    match current.take() {
        Some(open) => sections.push(open.finish(end)),
        None => flush_preamble(&mut sections, &mut preamble, end),
    }

    log::trace!(
        "Segmented {} into {} section(s)",
        doc.path.display(),
        sections.len()
    );

    Ok(sections)
}

/// Emit the preamble as an implicit section if it has non-blank content.
fn flush_preamble(sections: &mut Vec<Section>, preamble: &mut Vec<String>, end: usize) {
    if preamble.iter().any(|l| !l.trim().is_empty()) {
        sections.push(Section {
            heading: String::new(),
            level: 0,
            body: std::mem::take(preamble),
            span: 0..end,
            line: 1,
        });
    } else {
        preamble.clear();
    }
}

/// Iterate lines with their 1-based number and byte offset.
///
/// Lines are yielded without their trailing `\n` / `\r\n`; offsets point at
/// the first byte of each line in the original text.
fn line_spans(text: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut offset = 0;
    let mut line_no = 0;
    text.split_inclusive('\n').map(move |raw| {
        line_no += 1;
        let start = offset;
        offset += raw.len();
        let line = raw
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(raw);
        (line_no, start, line)
    })
}

/// Parse an ATX heading line into (level, title).
///
/// Follows the CommonMark shape: up to three leading spaces, 1-6 `#`
/// characters, then whitespace (or end of line). A trailing closing run of
/// `#` is stripped when it stands apart from the title.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }

    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &trimmed[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }

    let mut title = rest.trim();
    let stripped = title.trim_end_matches('#');
    if stripped.len() < title.len()
        && (stripped.is_empty() || stripped.ends_with(char::is_whitespace))
    {
        title = stripped.trim_end();
    }

    Some((hashes as u8, title))
}

/// Check whether a line opens or closes a fenced code block.
fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}
