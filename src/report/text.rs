//! Human-readable terminal output for scan reports.
//!
//! One block per duplicate group: the canonical location first, then every
//! redundant copy. Colors come from yansi and respect the global enable
//! state, so `--no-color` only has to call `yansi::disable()` once.

use std::io::{self, Write};

use yansi::Paint;

use crate::dedupe::detector::format_size;

use super::Report;

/// Text output formatter.
pub struct TextOutput<'a> {
    report: &'a Report,
}

impl<'a> TextOutput<'a> {
    /// Create a new text output formatter.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Write the report to the given writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let summary = &self.report.summary;

        if self.report.groups.is_empty() {
            writeln!(
                writer,
                "{} ({} section(s) across {} document(s))",
                "No duplicate sections found.".green(),
                summary.total_sections,
                summary.total_documents
            )?;
        } else {
            writeln!(
                writer,
                "{}: {} group(s), {} redundant section(s), {} of repeated text",
                "Duplicate sections".bold(),
                summary.duplicate_groups,
                summary.redundant_sections,
                format_size(summary.redundant_bytes).yellow()
            )?;

            for (idx, group) in self.report.groups.iter().enumerate() {
                let heading = if group.heading.is_empty() {
                    "(preamble)".to_string()
                } else {
                    format!("\"{}\"", group.heading)
                };
                writeln!(
                    writer,
                    "\n[{}] {} — {} copies",
                    idx + 1,
                    heading.bold(),
                    group.copies
                )?;
                writeln!(
                    writer,
                    "    {}  {}:{}",
                    "canonical".green(),
                    group.canonical.path,
                    group.canonical.line
                )?;
                for copy in &group.redundant {
                    writeln!(
                        writer,
                        "    {}  {}:{}",
                        "redundant".red(),
                        copy.path,
                        copy.line
                    )?;
                }
            }

            writeln!(
                writer,
                "\n{} document(s), {} section(s), {:.1}% duplication",
                summary.total_documents,
                summary.total_sections,
                summary.duplication_rate
            )?;
        }

        if !summary.errors.is_empty() {
            writeln!(
                writer,
                "\n{} {} document(s) skipped:",
                "Warning:".yellow().bold(),
                summary.skipped_documents
            )?;
            for message in &summary.errors {
                writeln!(writer, "    {}", message)?;
            }
        }

        Ok(())
    }

    /// Render the report as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting fails (unlikely for in-memory output).
    pub fn render(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
