//! Gene reference loading
//!
//! This module loads the canonical gene table from a tab-separated file
//! (optionally gzip-compressed) and indexes it for the matcher.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::info;

use crate::error::{ErrorCode, GeneMatchError};
use crate::io::open_reader;
use crate::reference::entry::GeneEntry;

/// Header value of the first reference column, when a header row is present.
const HEADER_FIRST_COLUMN: &str = "geneId";

/// A read-only gene reference indexed for symbol and synonym lookup
///
/// Index vectors hold entry positions in load order, so the first candidate
/// returned by any lookup is the earliest loaded entry.
#[derive(Debug, Clone)]
pub struct GeneReference {
    /// Entries in load order
    entries: Vec<GeneEntry>,
    /// Index from canonical symbol to entry positions
    symbol_index: HashMap<String, Vec<usize>>,
    /// Index from synonym token to entry positions
    synonym_index: HashMap<String, Vec<usize>>,
}

impl GeneReference {
    /// Build a reference from in-memory entries.
    ///
    /// Fails if `entries` is empty or two entries share a
    /// (symbol, chromosome) pair.
    pub fn from_entries(entries: Vec<GeneEntry>) -> Result<Self, GeneMatchError> {
        if entries.is_empty() {
            return Err(GeneMatchError::configuration_with_code(
                ErrorCode::EmptyReference,
                "reference dataset contains no genes",
            ));
        }

        let mut reference = Self {
            entries: Vec::with_capacity(entries.len()),
            symbol_index: HashMap::new(),
            synonym_index: HashMap::new(),
        };
        for entry in entries {
            reference.add(entry)?;
        }
        Ok(reference)
    }

    /// Load a reference from a tab-separated file.
    ///
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GeneMatchError> {
        let path = path.as_ref();
        let reader = open_reader(path).map_err(|e| {
            GeneMatchError::configuration(format!(
                "cannot open reference {}: {}",
                path.display(),
                e
            ))
        })?;
        let reference = Self::from_reader(reader)?;
        info!(
            "Loaded {} reference genes ({} synonyms) from {}",
            reference.len(),
            reference.synonym_count(),
            path.display()
        );
        Ok(reference)
    }

    /// Load a reference from any buffered reader.
    ///
    /// Blank lines and `#` comment lines are skipped, as is a leading
    /// header row whose first column is `geneId`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, GeneMatchError> {
        let mut entries = Vec::new();
        let mut seen_data = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                GeneMatchError::configuration_with_code(
                    ErrorCode::MalformedReference,
                    format!("line {}: {}", idx + 1, e),
                )
            })?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            if !seen_data {
                seen_data = true;
                let first = line.split('\t').next().unwrap_or_default().trim();
                if first.eq_ignore_ascii_case(HEADER_FIRST_COLUMN) {
                    continue;
                }
            }
            entries.push(GeneEntry::from_tsv_line(line, idx + 1)?);
        }

        Self::from_entries(entries)
    }

    fn add(&mut self, entry: GeneEntry) -> Result<(), GeneMatchError> {
        if let Some(existing) = self.get(&entry.symbol, &entry.chromosome) {
            return Err(GeneMatchError::configuration_with_code(
                ErrorCode::DuplicateReferenceEntry,
                format!(
                    "genes {} and {} share symbol '{}' on chromosome '{}'",
                    existing.id, entry.id, entry.symbol, entry.chromosome
                ),
            ));
        }

        let pos = self.entries.len();
        self.symbol_index
            .entry(entry.symbol.clone())
            .or_default()
            .push(pos);
        for synonym in &entry.synonyms {
            let positions = self
                .synonym_index
                .entry(synonym.to_ascii_uppercase())
                .or_default();
            if positions.last() != Some(&pos) {
                positions.push(pos);
            }
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Number of genes in the reference
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the reference has no genes (never true once built)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in load order
    pub fn entries(&self) -> &[GeneEntry] {
        &self.entries
    }

    /// Number of distinct synonym tokens
    pub fn synonym_count(&self) -> usize {
        self.synonym_index.len()
    }

    /// Exact lookup by canonical symbol and chromosome
    pub fn get(&self, symbol: &str, chromosome: &str) -> Option<&GeneEntry> {
        self.by_symbol(symbol)
            .find(|entry| entry.chromosome == chromosome)
    }

    /// Entries whose canonical symbol is `symbol`, in load order
    pub fn by_symbol<'a>(&'a self, symbol: &str) -> impl Iterator<Item = &'a GeneEntry> + 'a {
        self.lookup(&self.symbol_index, symbol)
    }

    /// Entries listing `synonym` among their synonyms, ignoring ASCII case,
    /// in load order
    pub fn by_synonym<'a>(&'a self, synonym: &str) -> impl Iterator<Item = &'a GeneEntry> + 'a {
        self.lookup(&self.synonym_index, &synonym.to_ascii_uppercase())
    }

    fn lookup<'a>(
        &'a self,
        index: &'a HashMap<String, Vec<usize>>,
        key: &str,
    ) -> impl Iterator<Item = &'a GeneEntry> + 'a {
        index
            .get(key)
            .map(|positions| positions.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&pos| &self.entries[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#geneId\thugo\tchromosome\tsynonyms\ttype_of_gene
7157\tTP53\t17\tBCC7|LFS1|P53\tprotein-coding
672\tBRCA1\t17\tBRCAI|BRCC1|RNF53\tprotein-coding

1438\tCSF2RA\tX|Y\tCD116|CSF2R\tprotein-coding
";

    #[test]
    fn test_from_reader() {
        let reference = GeneReference::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(reference.len(), 3);
        assert!(!reference.is_empty());
        assert_eq!(reference.entries()[0].symbol, "TP53");
    }

    #[test]
    fn test_header_row_skipped() {
        let content = "geneId\thugo\tchromosome\tsynonyms\ttype_of_gene\n\
                       7157\tTP53\t17\tP53\tprotein-coding\n";
        let reference = GeneReference::from_reader(content.as_bytes()).unwrap();
        assert_eq!(reference.len(), 1);
    }

    #[test]
    fn test_get_exact() {
        let reference = GeneReference::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(reference.get("TP53", "17").map(|e| e.id), Some(7157));
        assert!(reference.get("TP53", "1").is_none());
        assert!(reference.get("CSF2RA", "X").is_none());
        assert_eq!(reference.get("CSF2RA", "X|Y").map(|e| e.id), Some(1438));
    }

    #[test]
    fn test_by_synonym() {
        let reference = GeneReference::from_reader(SAMPLE.as_bytes()).unwrap();
        let ids: Vec<u64> = reference.by_synonym("P53").map(|e| e.id).collect();
        assert_eq!(ids, vec![7157]);
        assert_eq!(reference.by_synonym("P5").count(), 0);
        assert_eq!(reference.synonym_count(), 8);
    }

    #[test]
    fn test_by_synonym_ignores_case() {
        let reference = GeneReference::from_reader(SAMPLE.as_bytes()).unwrap();
        let ids: Vec<u64> = reference.by_synonym("cd116").map(|e| e.id).collect();
        assert_eq!(ids, vec![1438]);
        assert_eq!(reference.by_synonym("p53").count(), 1);
        assert!(reference.get("tp53", "17").is_none());
    }

    #[test]
    fn test_case_variant_synonyms_index_once() {
        let entry = GeneEntry::new(1438, "CSF2RA", "X|Y").with_synonyms("CDw116|CDW116");
        let reference = GeneReference::from_entries(vec![entry]).unwrap();
        assert_eq!(reference.by_synonym("CDW116").count(), 1);
        assert_eq!(reference.synonym_count(), 1);
    }

    #[test]
    fn test_shared_synonym_keeps_load_order() {
        let entries = vec![
            GeneEntry::new(2, "GENEB", "3").with_synonyms("SHARED"),
            GeneEntry::new(1, "GENEA", "3").with_synonyms("SHARED"),
        ];
        let reference = GeneReference::from_entries(entries).unwrap();
        let ids: Vec<u64> = reference.by_synonym("SHARED").map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_empty_reference_rejected() {
        let err = GeneReference::from_reader("# only a comment\n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyReference);

        let err = GeneReference::from_entries(Vec::new()).unwrap_err();
        assert!(matches!(err, GeneMatchError::Configuration { .. }));
    }

    #[test]
    fn test_duplicate_symbol_chromosome_rejected() {
        let entries = vec![GeneEntry::new(1, "DUP", "5"), GeneEntry::new(2, "DUP", "5")];
        let err = GeneReference::from_entries(entries).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateReferenceEntry);
    }

    #[test]
    fn test_same_symbol_other_chromosome_allowed() {
        let entries = vec![GeneEntry::new(1, "SAME", "5"), GeneEntry::new(2, "SAME", "6")];
        let reference = GeneReference::from_entries(entries).unwrap();
        assert_eq!(reference.by_symbol("SAME").count(), 2);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let content = "7157\tTP53\t17\tP53\tprotein-coding\n672\tBRCA1\n";
        let err = GeneReference::from_reader(content.as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedReference);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_invalid_utf8_reference_is_configuration_error() {
        let content: &[u8] =
            b"7157\tTP53\t17\tP53\tprotein-coding\n672\tBRCA\xff1\t17\t-\tprotein-coding\n";
        let err = GeneReference::from_reader(content).unwrap_err();
        assert!(matches!(err, GeneMatchError::Configuration { .. }));
        assert_eq!(err.code(), ErrorCode::MalformedReference);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = GeneReference::from_path("/nonexistent/genes.tsv").unwrap_err();
        assert!(matches!(err, GeneMatchError::Configuration { .. }));
    }
}
