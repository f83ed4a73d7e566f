//! A single canonical gene record.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, GeneMatchError};

/// Separator used inside multi-valued reference fields.
pub const FIELD_SEPARATOR: char = '|';

/// Number of columns in a reference row.
pub const REFERENCE_COLUMNS: usize = 5;

/// A canonical gene from the reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneEntry {
    /// Numeric gene identifier (Entrez Gene ID)
    pub id: u64,
    /// Canonical (HUGO) symbol
    pub symbol: String,
    /// Chromosome, possibly pipe-delimited for multi-chromosome genes
    pub chromosome: String,
    /// Alternate names, in source order without duplicates
    pub synonyms: Vec<String>,
    /// Gene type, e.g. `protein-coding` or `pseudo`
    pub gene_type: String,
}

impl GeneEntry {
    /// Create an entry with no synonyms and an empty gene type.
    pub fn new(id: u64, symbol: impl Into<String>, chromosome: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            chromosome: chromosome.into(),
            synonyms: Vec::new(),
            gene_type: String::new(),
        }
    }

    /// Set synonyms from their pipe-delimited source form.
    pub fn with_synonyms(mut self, synonyms: &str) -> Self {
        self.synonyms = parse_synonyms(synonyms);
        self
    }

    /// Set the gene type.
    pub fn with_gene_type(mut self, gene_type: impl Into<String>) -> Self {
        self.gene_type = gene_type.into();
        self
    }

    /// Whether `name` is one of this gene's synonyms (whole token, ASCII
    /// case-insensitive).
    pub fn has_synonym(&self, name: &str) -> bool {
        self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(name))
    }

    /// Individual chromosome values of this entry.
    pub fn chromosome_tokens(&self) -> impl Iterator<Item = &str> {
        split_tokens(&self.chromosome)
    }

    /// Parse one tab-separated reference row.
    ///
    /// Columns are `geneId`, `hugo`, `chromosome`, `synonyms`, `type_of_gene`.
    /// `line_number` is 1-based and only used for error messages.
    pub fn from_tsv_line(line: &str, line_number: usize) -> Result<Self, GeneMatchError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != REFERENCE_COLUMNS {
            return Err(GeneMatchError::configuration_with_code(
                ErrorCode::MalformedReference,
                format!(
                    "line {}: expected {} tab-separated fields, found {}",
                    line_number,
                    REFERENCE_COLUMNS,
                    fields.len()
                ),
            ));
        }

        let id = fields[0].trim().parse::<u64>().map_err(|e| {
            GeneMatchError::configuration_with_code(
                ErrorCode::MalformedReference,
                format!("line {}: invalid gene id '{}': {}", line_number, fields[0], e),
            )
        })?;

        let symbol = fields[1].trim();
        if symbol.is_empty() {
            return Err(GeneMatchError::configuration_with_code(
                ErrorCode::MalformedReference,
                format!("line {}: empty gene symbol", line_number),
            ));
        }

        Ok(GeneEntry::new(id, symbol, fields[2].trim())
            .with_synonyms(fields[3].trim())
            .with_gene_type(fields[4].trim()))
    }
}

/// Split a pipe-delimited synonym field into an ordered, de-duplicated list.
///
/// `-` is the conventional placeholder for "none" and yields no synonyms.
pub fn parse_synonyms(field: &str) -> Vec<String> {
    let mut synonyms: Vec<String> = Vec::new();
    for token in split_tokens(field) {
        if token == "-" || synonyms.iter().any(|s| s == token) {
            continue;
        }
        synonyms.push(token.to_string());
    }
    synonyms
}

/// Non-empty values of a pipe-delimited field.
pub fn split_tokens(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
