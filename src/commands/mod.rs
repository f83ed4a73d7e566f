//! File-level commands behind the ferro-genes CLI.
//!
//! Each command wraps a matcher operation with file handling and timing so
//! the binary stays a thin argument parser.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::GeneMatchError;
use crate::io::{write_match_files, ExportPaths};
use crate::maf::{default_output_path, update_maf_symbols, MafUpdateOptions, MafUpdateReport};
use crate::matcher::{MatchSummary, Matcher};

/// Timing information for a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingInfo {
    /// Total records processed
    pub total: usize,

    /// Total elapsed time in seconds
    pub elapsed_seconds: f64,

    /// Throughput (records per second)
    pub records_per_second: f64,
}

impl TimingInfo {
    /// Create timing info from measurements.
    pub fn new(total: usize, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let throughput = if elapsed_secs > f64::EPSILON {
            total as f64 / elapsed_secs
        } else {
            0.0
        };

        Self {
            total,
            elapsed_seconds: elapsed_secs,
            records_per_second: throughput,
        }
    }
}

/// Outcome of [`match_file`].
#[derive(Debug, Clone, Serialize)]
pub struct MatchFileReport {
    /// Counts for the batch
    pub summary: MatchSummary,
    /// Full export path
    pub full_path: PathBuf,
    /// Converted export path
    pub converted_path: PathBuf,
    /// Failed export path, when any record failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_path: Option<PathBuf>,
    /// Timing information
    pub timing: TimingInfo,
}

/// Outcome of [`update_maf_file`].
#[derive(Debug, Clone, Serialize)]
pub struct MafFileReport {
    /// What the update did
    #[serde(flatten)]
    pub report: MafUpdateReport,
    /// Timing information
    pub timing: TimingInfo,
}

/// Match a headerless (symbol, chromosome) file and export the results.
///
/// Exports go to `out_dir`, named after the input file:
/// `genes.txt` gives `genes.txt_full.txt`, `genes.txt_converted.txt` and,
/// if anything failed, `genes.txt_failed.txt`.
pub fn match_file(
    matcher: &mut Matcher,
    input: &Path,
    out_dir: &Path,
) -> Result<MatchFileReport, GeneMatchError> {
    let file_name = input.file_name().ok_or_else(|| {
        GeneMatchError::invalid_input(format!("not a file path: {}", input.display()))
    })?;

    let start = Instant::now();
    let result = matcher.import_file(input)?;
    let ExportPaths {
        full,
        converted,
        failed,
    } = write_match_files(result, &out_dir.join(file_name))?;
    let summary = result.summary();
    let timing = TimingInfo::new(summary.total, start.elapsed());

    info!("{}", summary);
    Ok(MatchFileReport {
        summary,
        full_path: full,
        converted_path: converted,
        failed_path: failed,
        timing,
    })
}

/// Update a MAF file's symbols, naming the output with `suffix` when no
/// output path is given.
pub fn update_maf_file(
    matcher: &mut Matcher,
    input: &Path,
    output: Option<&Path>,
    suffix: &str,
    options: &MafUpdateOptions,
) -> Result<MafFileReport, GeneMatchError> {
    let out_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, suffix));

    let start = Instant::now();
    let report = update_maf_symbols(matcher, input, Some(&out_path), options)?;
    let timing = TimingInfo::new(report.rows_written + report.rows_dropped, start.elapsed());
    Ok(MafFileReport { report, timing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::GeneReference;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn matcher() -> Matcher {
        Matcher::new(Arc::new(GeneReference::with_test_data()))
    }

    #[test]
    fn test_timing_info_zero_elapsed() {
        let timing = TimingInfo::new(10, Duration::ZERO);
        assert_eq!(timing.total, 10);
        assert_eq!(timing.records_per_second, 0.0);
    }

    #[test]
    fn test_match_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("genes.txt");
        let mut f = File::create(&input).unwrap();
        writeln!(f, "TP53\t17").unwrap();
        writeln!(f, "9-Sep\t17").unwrap();
        writeln!(f, "NOTAGENE\t3").unwrap();

        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();
        let report = match_file(&mut matcher(), &input, &out_dir).unwrap();

        assert_eq!(report.summary.matched, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.full_path, out_dir.join("genes.txt_full.txt"));
        assert_eq!(report.converted_path, out_dir.join("genes.txt_converted.txt"));
        assert_eq!(report.failed_path, Some(out_dir.join("genes.txt_failed.txt")));
        assert_eq!(report.timing.total, 3);
    }

    #[test]
    fn test_match_file_missing_input() {
        let dir = TempDir::new().unwrap();
        let err = match_file(&mut matcher(), &dir.path().join("absent.txt"), dir.path())
            .unwrap_err();
        assert!(matches!(err, GeneMatchError::Io { .. }));
    }

    #[test]
    fn test_update_maf_file_uses_suffix() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("tumor.maf");
        let mut f = File::create(&input).unwrap();
        writeln!(
            f,
            "Hugo_Symbol\tEntrez_Gene_Id\tChromosome\tStart_Position\tEnd_Position"
        )
        .unwrap();
        writeln!(f, "P53\t0\t17\t7675088\t7675088").unwrap();

        let report = update_maf_file(
            &mut matcher(),
            &input,
            None,
            "_fixed.maf",
            &MafUpdateOptions::default(),
        )
        .unwrap();
        assert_eq!(report.report.out_path, dir.path().join("tumor_fixed.maf"));
        assert_eq!(report.report.rows_written, 1);
        assert_eq!(report.timing.total, 1);
    }
}
