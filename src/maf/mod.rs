//! Mutation Annotation Format (MAF) symbol updates
//!
//! Rewrites the gene symbol and gene id columns of a MAF file using the
//! [`Matcher`]. Matching is by (symbol, chromosome) only: every distinct
//! pair is resolved once and the outcome is joined back onto each row.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use ferro_gene_matcher::maf::{update_maf_symbols, MafUpdateOptions};
//! use ferro_gene_matcher::Matcher;
//!
//! let mut matcher = Matcher::from_path("gene_info.tsv")?;
//! let report = update_maf_symbols(
//!     &mut matcher,
//!     Path::new("tumor.maf"),
//!     None,
//!     &MafUpdateOptions::default(),
//! )?;
//! println!("wrote {} rows to {}", report.rows_written, report.out_path.display());
//! # Ok::<(), ferro_gene_matcher::GeneMatchError>(())
//! ```

mod columns;

pub use columns::{locate_columns, MafColumns, REQUIRED_COLUMNS};

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::error::GeneMatchError;
use crate::io::open_reader;
use crate::matcher::Matcher;

/// Default suffix for updated MAF files
pub const DEFAULT_MAF_SUFFIX: &str = "_hugofix.maf";

/// Options for [`update_maf_symbols`]
#[derive(Debug, Clone, Default)]
pub struct MafUpdateOptions {
    /// Drop rows whose (symbol, chromosome) pair did not resolve
    pub drop_unmatched: bool,
}

impl MafUpdateOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether unresolved rows are dropped.
    pub fn drop_unmatched(mut self, drop_unmatched: bool) -> Self {
        self.drop_unmatched = drop_unmatched;
        self
    }
}

/// What [`update_maf_symbols`] did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MafUpdateReport {
    /// Output file
    pub out_path: PathBuf,
    /// Data rows written
    pub rows_written: usize,
    /// Data rows dropped as unresolved
    pub rows_dropped: usize,
    /// Distinct (symbol, chromosome) pairs submitted to the matcher
    pub unique_pairs: usize,
    /// Distinct pairs that resolved
    pub matched_pairs: usize,
}

/// Default output path: the input with its extension replaced by `suffix`.
///
/// `tumor.maf` becomes `tumor_hugofix.maf`.
pub fn default_output_path(maf_path: &Path, suffix: &str) -> PathBuf {
    let stem = maf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    maf_path.with_file_name(format!("{}{}", stem, suffix))
}

/// Read leading `#` lines so they can be copied to the output.
fn read_leading_comments<R: BufRead>(reader: &mut R) -> Result<Vec<String>, GeneMatchError> {
    let mut comments = Vec::new();
    loop {
        let starts_with_hash = reader.fill_buf()?.first() == Some(&b'#');
        if !starts_with_hash {
            return Ok(comments);
        }
        let mut line = String::new();
        reader.read_line(&mut line)?;
        comments.push(line.trim_end_matches(['\r', '\n']).to_string());
    }
}

/// Update the symbol and gene id columns of a MAF file.
///
/// Columns are located by pattern (see [`locate_columns`]) and renamed to
/// `Hugo_Symbol`, `Chromosome`, `Entrez_Gene_Id`, `Start_Position` and
/// `End_Position`. Unresolved rows keep their symbol and get id `0`, unless
/// `options.drop_unmatched` removes them. Leading comment lines are copied
/// unchanged; later comment lines are skipped.
///
/// Writes to `out_path`, or to [`default_output_path`] with
/// [`DEFAULT_MAF_SUFFIX`] when `None`.
pub fn update_maf_symbols(
    matcher: &mut Matcher,
    maf_path: &Path,
    out_path: Option<&Path>,
    options: &MafUpdateOptions,
) -> Result<MafUpdateReport, GeneMatchError> {
    let out_path = out_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(maf_path, DEFAULT_MAF_SUFFIX));

    let mut reader = open_reader(maf_path).map_err(|e| GeneMatchError::Io {
        msg: format!("cannot open {}: {}", maf_path.display(), e),
    })?;
    let comments = read_leading_comments(&mut reader)?;

    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .quoting(false)
        .from_reader(reader);
    let mut headers = tsv.headers()?.clone();
    let columns = locate_columns(&headers)?;
    let rows = tsv.records().collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    let mut chromosomes = Vec::new();
    for row in &rows {
        let symbol = &row[columns.hugo];
        let chromosome = &row[columns.chromosome];
        if seen.insert((symbol.to_string(), chromosome.to_string())) {
            symbols.push(symbol.to_string());
            chromosomes.push(chromosome.to_string());
        }
    }

    let result = matcher.submit_batch(&symbols, &chromosomes)?;
    let mut resolved: HashMap<&str, HashMap<&str, (&str, u64)>> = HashMap::new();
    for record in result.matched() {
        if let (Some(symbol), Some(id)) = (&record.resolved_symbol, record.resolved_id) {
            resolved
                .entry(record.raw_symbol.as_str())
                .or_default()
                .insert(record.raw_chromosome.as_str(), (symbol.as_str(), id));
        }
    }

    headers = columns.renamed_headers(&headers);
    let file = File::create(&out_path).map_err(|e| GeneMatchError::Io {
        msg: format!("cannot create {}: {}", out_path.display(), e),
    })?;
    let mut out = BufWriter::new(file);
    for comment in &comments {
        writeln!(out, "{}", comment)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);
    writer.write_record(&headers)?;

    let mut rows_written = 0;
    let mut rows_dropped = 0;
    for row in &rows {
        let hit = resolved
            .get(&row[columns.hugo])
            .and_then(|by_chrom| by_chrom.get(&row[columns.chromosome]));
        if hit.is_none() && options.drop_unmatched {
            rows_dropped += 1;
            continue;
        }
        let (symbol, id) = hit.copied().unwrap_or((&row[columns.hugo], 0));
        let id = id.to_string();
        let fields = row.iter().enumerate().map(|(i, field)| {
            if i == columns.hugo {
                symbol
            } else if i == columns.entrez {
                id.as_str()
            } else {
                field
            }
        });
        writer.write_record(fields)?;
        rows_written += 1;
    }
    writer.flush()?;

    let report = MafUpdateReport {
        out_path,
        rows_written,
        rows_dropped,
        unique_pairs: symbols.len(),
        matched_pairs: result.n_matched(),
    };
    info!(
        "Updated {} rows ({} of {} symbol/chromosome pairs matched, {} rows dropped) -> {}",
        report.rows_written,
        report.matched_pairs,
        report.unique_pairs,
        report.rows_dropped,
        report.out_path.display()
    );
    Ok(report)
}
