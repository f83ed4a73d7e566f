//! Headerless (symbol, chromosome) input files.

use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use crate::error::{ErrorCode, GeneMatchError};
use crate::io::open_reader;

/// Read a headerless tab-separated file of symbols and chromosomes.
///
/// The first column is the symbol and the second the chromosome; further
/// columns are ignored. Returns the two columns as parallel vectors.
pub fn read_symbol_file<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<String>, Vec<String>), GeneMatchError> {
    let path = path.as_ref();
    let reader = open_reader(path).map_err(|e| GeneMatchError::Io {
        msg: format!("cannot open {}: {}", path.display(), e),
    })?;
    let (symbols, chromosomes) = parse_symbol_reader(reader)?;
    debug!("Read {} rows from {}", symbols.len(), path.display());
    Ok((symbols, chromosomes))
}

/// UTF-8 byte order mark, common in files saved from spreadsheet software
const UTF8_BOM: &str = "\u{feff}";

/// Strip a UTF-8 BOM from the beginning of a string if present.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Parse (symbol, chromosome) rows from any reader. Blank lines are skipped.
pub fn parse_symbol_reader<R: Read>(
    reader: R,
) -> Result<(Vec<String>, Vec<String>), GeneMatchError> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut symbols = Vec::new();
    let mut chromosomes = Vec::new();
    let mut extra_columns = 0usize;
    for record in tsv.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let (Some(symbol), Some(chromosome)) = (record.get(0), record.get(1)) else {
            return Err(GeneMatchError::invalid_input_with_code(
                ErrorCode::MissingField,
                format!("line {}: expected symbol and chromosome columns", line),
            ));
        };
        if record.len() > 2 {
            extra_columns += 1;
        }
        let symbol = if symbols.is_empty() {
            strip_bom(symbol)
        } else {
            symbol
        };
        symbols.push(symbol.trim().to_string());
        chromosomes.push(chromosome.trim().to_string());
    }
    if extra_columns > 0 {
        warn!(
            "{} rows have more than two columns; only symbol and chromosome are used",
            extra_columns
        );
    }
    Ok((symbols, chromosomes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_columns() {
        let (symbols, chromosomes) =
            parse_symbol_reader("TP53\t17\nP53\t17\n1-Mar\t4\n".as_bytes()).unwrap();
        assert_eq!(symbols, vec!["TP53", "P53", "1-Mar"]);
        assert_eq!(chromosomes, vec!["17", "17", "4"]);
    }

    #[test]
    fn test_blank_lines_and_extra_columns() {
        let (symbols, chromosomes) =
            parse_symbol_reader("TP53\t17\tnote\n\nMYC\t8\r\n".as_bytes()).unwrap();
        assert_eq!(symbols, vec!["TP53", "MYC"]);
        assert_eq!(chromosomes, vec!["17", "8"]);
    }

    #[test]
    fn test_leading_bom() {
        let (symbols, _) = parse_symbol_reader("\u{feff}TP53\t17\n".as_bytes()).unwrap();
        assert_eq!(symbols, vec!["TP53"]);
        assert_eq!(strip_bom("MYC"), "MYC");
    }

    #[test]
    fn test_missing_chromosome() {
        let err = parse_symbol_reader("TP53\t17\nMYC\n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_symbol_file("/nonexistent/symbols.txt").unwrap_err();
        assert!(matches!(err, GeneMatchError::Io { .. }));
    }
}
