//! Matching rules of the resolution cascade
//!
//! Each [`MatchRule`] combines three independent choices:
//!
//! - which reference name the raw symbol is compared to ([`NameKey`]),
//! - how the raw chromosome is compared ([`ChromosomeMatch`]),
//! - whether placeholder gene types are excluded.
//!
//! Rules are evaluated one at a time over a whole batch, in the order of
//! [`DEFAULT_CASCADE`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::entry::{split_tokens, FIELD_SEPARATOR};
use crate::reference::{GeneEntry, GeneReference};

/// Gene types skipped by the type-filtered rules.
pub const EXCLUDED_GENE_TYPES: [&str; 3] = ["pseudo", "unknown", "other"];

/// Reference name a raw symbol is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKey {
    /// The canonical symbol
    Symbol,
    /// Any whole synonym token
    Synonym,
}

/// How a raw chromosome is compared to a reference chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromosomeMatch {
    /// Identical strings
    Exact,
    /// Multi-valued on at least one side, with a shared value
    Ambiguous,
}

impl ChromosomeMatch {
    /// Test a raw chromosome against a reference chromosome.
    pub fn matches(self, raw: &str, reference: &str) -> bool {
        match self {
            ChromosomeMatch::Exact => raw == reference,
            ChromosomeMatch::Ambiguous => chromosomes_overlap(raw, reference),
        }
    }
}

/// Whether a chromosome field holds more than one value.
pub fn is_multi_valued(chromosome: &str) -> bool {
    chromosome.contains(FIELD_SEPARATOR)
}

/// Ambiguous-chromosome test.
///
/// True when either field is pipe-delimited and the two sets of values
/// intersect, e.g. `X` against `X|Y`, or `2|5` against `2`.
pub fn chromosomes_overlap(raw: &str, reference: &str) -> bool {
    if !is_multi_valued(raw) && !is_multi_valued(reference) {
        return false;
    }
    split_tokens(raw).any(|r| split_tokens(reference).any(|c| c.eq_ignore_ascii_case(r)))
}

/// Whether a gene type is excluded by the type-filtered rules.
pub fn is_excluded_gene_type(gene_type: &str) -> bool {
    EXCLUDED_GENE_TYPES.contains(&gene_type)
}

/// One step of the resolution cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Canonical symbol and chromosome both equal
    ExactSymbol,
    /// Synonym with identical chromosome
    SynonymExactChromosome,
    /// Canonical symbol with overlapping multi-valued chromosome
    SymbolAmbiguousChromosome,
    /// Synonym with overlapping multi-valued chromosome
    SynonymAmbiguousChromosome,
    /// Synonym with identical chromosome, placeholder gene types excluded
    SynonymExactChromosomeTyped,
    /// Synonym with overlapping chromosome, placeholder gene types excluded
    SynonymAmbiguousChromosomeTyped,
}

/// The cascade in precedence order.
pub const DEFAULT_CASCADE: [MatchRule; 6] = [
    MatchRule::ExactSymbol,
    MatchRule::SynonymExactChromosome,
    MatchRule::SymbolAmbiguousChromosome,
    MatchRule::SynonymAmbiguousChromosome,
    MatchRule::SynonymExactChromosomeTyped,
    MatchRule::SynonymAmbiguousChromosomeTyped,
];

impl MatchRule {
    /// Position of this rule in the default cascade, starting at 1.
    pub fn number(self) -> u8 {
        match self {
            MatchRule::ExactSymbol => 1,
            MatchRule::SynonymExactChromosome => 2,
            MatchRule::SymbolAmbiguousChromosome => 3,
            MatchRule::SynonymAmbiguousChromosome => 4,
            MatchRule::SynonymExactChromosomeTyped => 5,
            MatchRule::SynonymAmbiguousChromosomeTyped => 6,
        }
    }

    /// Short stable label, used in summaries and logs.
    pub fn label(self) -> &'static str {
        match self {
            MatchRule::ExactSymbol => "exact_symbol",
            MatchRule::SynonymExactChromosome => "synonym_exact_chromosome",
            MatchRule::SymbolAmbiguousChromosome => "symbol_ambiguous_chromosome",
            MatchRule::SynonymAmbiguousChromosome => "synonym_ambiguous_chromosome",
            MatchRule::SynonymExactChromosomeTyped => "synonym_exact_chromosome_typed",
            MatchRule::SynonymAmbiguousChromosomeTyped => "synonym_ambiguous_chromosome_typed",
        }
    }

    /// Reference name compared against the raw symbol
    pub fn name_key(self) -> NameKey {
        match self {
            MatchRule::ExactSymbol | MatchRule::SymbolAmbiguousChromosome => NameKey::Symbol,
            _ => NameKey::Synonym,
        }
    }

    /// Chromosome comparison
    pub fn chromosome_match(self) -> ChromosomeMatch {
        match self {
            MatchRule::ExactSymbol
            | MatchRule::SynonymExactChromosome
            | MatchRule::SynonymExactChromosomeTyped => ChromosomeMatch::Exact,
            _ => ChromosomeMatch::Ambiguous,
        }
    }

    /// Whether placeholder gene types are excluded
    pub fn filters_gene_type(self) -> bool {
        matches!(
            self,
            MatchRule::SynonymExactChromosomeTyped | MatchRule::SynonymAmbiguousChromosomeTyped
        )
    }

    /// Whether `entry` satisfies this rule for the given raw pair.
    pub fn accepts(self, entry: &GeneEntry, symbol: &str, chromosome: &str) -> bool {
        let name_ok = match self.name_key() {
            NameKey::Symbol => entry.symbol == symbol,
            NameKey::Synonym => entry.has_synonym(symbol),
        };
        name_ok
            && self.chromosome_match().matches(chromosome, &entry.chromosome)
            && !(self.filters_gene_type() && is_excluded_gene_type(&entry.gene_type))
    }

    /// Find the first reference entry, in load order, satisfying this rule.
    pub fn find<'a>(
        self,
        reference: &'a GeneReference,
        symbol: &str,
        chromosome: &str,
    ) -> Option<&'a GeneEntry> {
        match self.name_key() {
            NameKey::Symbol => reference
                .by_symbol(symbol)
                .find(|entry| self.accepts(entry, symbol, chromosome)),
            NameKey::Synonym => reference
                .by_synonym(symbol)
                .find(|entry| self.accepts(entry, symbol, chromosome)),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({})", self.number(), self.label())
    }
}
