//! Output formatting utilities for CLI operations

use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::commands::{MafFileReport, MatchFileReport};
use crate::error::GeneMatchError;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_gene_matcher::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// assert!(matches!(OutputFormat::from_str("other").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)
}

/// Write the outcome of a `match` run
///
/// Text output is the summary line followed by the written files.
pub fn output_match_report<W: Write>(
    writer: &mut W,
    report: &MatchFileReport,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, report),
        OutputFormat::Text => {
            writeln!(writer, "{}", report.summary)?;
            for (source, count) in &report.summary.by_source {
                writeln!(writer, "  {}: {}", source, count)?;
            }
            writeln!(writer, "full: {}", report.full_path.display())?;
            writeln!(writer, "converted: {}", report.converted_path.display())?;
            if let Some(failed) = &report.failed_path {
                writeln!(writer, "failed: {}", failed.display())?;
            }
            Ok(())
        }
    }
}

/// Write the outcome of an `update-maf` run
pub fn output_maf_report<W: Write>(
    writer: &mut W,
    report: &MafFileReport,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, report),
        OutputFormat::Text => {
            let r = &report.report;
            writeln!(
                writer,
                "{} of {} gene pairs matched; {} rows written, {} dropped",
                r.matched_pairs, r.unique_pairs, r.rows_written, r.rows_dropped
            )?;
            writeln!(writer, "output: {}", r.out_path.display())
        }
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_gene_matcher::cli::{output_error, OutputFormat};
/// use ferro_gene_matcher::GeneMatchError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = GeneMatchError::invalid_input("bad row");
/// output_error(&mut buffer, &error, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.starts_with("ERROR [E2002]"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    error: &GeneMatchError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &serde_json::json!({
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            }),
        ),
        OutputFormat::Text => writeln!(writer, "ERROR [{}] {}", error.code(), error),
    }
}
