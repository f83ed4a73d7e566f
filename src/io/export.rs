//! Writing a batch result to the three tab-separated export files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::GeneMatchError;
use crate::matcher::{MatchRecord, MatchResult};

/// Paths written by [`write_match_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Every record, defaults filled in
    pub full: PathBuf,
    /// Resolved records
    pub converted: PathBuf,
    /// Unresolved (symbol, chromosome) pairs; only written when there are any
    pub failed: Option<PathBuf>,
}

/// Append a suffix to a path without treating it as an extension.
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn tsv_writer(
    path: &Path,
    has_headers: bool,
) -> Result<csv::Writer<std::fs::File>, GeneMatchError> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .from_path(path)
        .map_err(|e| GeneMatchError::Io {
            msg: format!("cannot create {}: {}", path.display(), e),
        })
}

/// Write `<base>_full.txt`, `<base>_converted.txt` and, when some records
/// failed, `<base>_failed.txt`.
///
/// The first two carry a `user_symbol chromosome hugo entrez_id` header.
/// The failed file holds raw `symbol chromosome` pairs without a header.
pub fn write_match_files(result: &MatchResult, base: &Path) -> Result<ExportPaths, GeneMatchError> {
    let full = with_suffix(base, "_full.txt");
    let mut writer = tsv_writer(&full, true)?;
    for row in result.full() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let converted = with_suffix(base, "_converted.txt");
    let mut writer = tsv_writer(&converted, true)?;
    for row in result.matched().map(MatchRecord::to_full_row) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let failed = if result.n_failed() > 0 {
        let path = with_suffix(base, "_failed.txt");
        let mut writer = tsv_writer(&path, false)?;
        for record in result.failed() {
            writer.write_record([record.raw_symbol.as_str(), record.raw_chromosome.as_str()])?;
        }
        writer.flush()?;
        Some(path)
    } else {
        None
    };

    info!("Wrote match results to {}", full.display());
    Ok(ExportPaths {
        full,
        converted,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::reference::GeneReference;
    use std::sync::Arc;

    fn run(symbols: &[&str], chromosomes: &[&str]) -> MatchResult {
        let mut matcher = Matcher::new(Arc::new(GeneReference::with_test_data()));
        matcher.submit_batch(symbols, chromosomes).unwrap().clone()
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix(Path::new("out/genes.txt"), "_full.txt"),
            PathBuf::from("out/genes.txt_full.txt")
        );
    }

    #[test]
    fn test_write_all_three() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = run(&["TP53", "NOTAGENE"], &["17", "1"]);
        let paths = write_match_files(&result, &dir.path().join("genes")).unwrap();

        let full = std::fs::read_to_string(&paths.full).unwrap();
        assert_eq!(
            full,
            "user_symbol\tchromosome\thugo\tentrez_id\n\
             TP53\t17\tTP53\t7157\n\
             NOTAGENE\t1\tNOTAGENE\t0\n"
        );

        let converted = std::fs::read_to_string(&paths.converted).unwrap();
        assert_eq!(
            converted,
            "user_symbol\tchromosome\thugo\tentrez_id\nTP53\t17\tTP53\t7157\n"
        );

        let failed = std::fs::read_to_string(paths.failed.unwrap()).unwrap();
        assert_eq!(failed, "NOTAGENE\t1\n");
    }

    #[test]
    fn test_no_failed_file_without_failures() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = run(&["MYC"], &["8"]);
        let paths = write_match_files(&result, &dir.path().join("genes")).unwrap();
        assert!(paths.failed.is_none());
        assert!(!dir.path().join("genes_failed.txt").exists());
    }
}
