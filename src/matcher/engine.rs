//! The matching engine.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::error::{ErrorCode, GeneMatchError};
use crate::io::read_symbol_file;
use crate::matcher::overrides::find_override;
use crate::matcher::result::{MatchRecord, MatchResult, MatchSource};
use crate::matcher::rules::{MatchRule, DEFAULT_CASCADE};
use crate::reference::GeneReference;

/// Resolves batches of (symbol, chromosome) pairs against a gene reference
///
/// An engine holds one batch at a time; submitting a new batch replaces the
/// previous result. The reference is shared read-only, so several engines
/// can be built from one `Arc<GeneReference>`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ferro_gene_matcher::{GeneReference, Matcher};
///
/// let mut matcher = Matcher::new(Arc::new(GeneReference::with_test_data()));
/// let result = matcher.submit_batch(&["TP53", "NOTAGENE"], &["17", "1"]).unwrap();
/// assert_eq!(result.n_matched(), 1);
/// assert_eq!(result.n_failed(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    reference: Arc<GeneReference>,
    rules: Vec<MatchRule>,
    result: Option<MatchResult>,
}

impl Matcher {
    /// Create an engine over a loaded reference.
    pub fn new(reference: Arc<GeneReference>) -> Self {
        Self {
            reference,
            rules: DEFAULT_CASCADE.to_vec(),
            result: None,
        }
    }

    /// Load the reference from a file and create an engine over it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GeneMatchError> {
        Ok(Self::new(Arc::new(GeneReference::from_path(path)?)))
    }

    /// The shared reference
    pub fn reference(&self) -> &Arc<GeneReference> {
        &self.reference
    }

    /// Cascade rules in evaluation order
    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    /// Result of the most recent batch
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Resolve a batch of parallel symbol and chromosome sequences.
    ///
    /// Fails with an invalid-input error if the sequences differ in length.
    /// Individual records that do not resolve are not errors; they end up
    /// in [`MatchResult::failed`].
    pub fn submit_batch<S, C>(
        &mut self,
        symbols: &[S],
        chromosomes: &[C],
    ) -> Result<&MatchResult, GeneMatchError>
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        if symbols.len() != chromosomes.len() {
            return Err(GeneMatchError::invalid_input_with_code(
                ErrorCode::LengthMismatch,
                format!(
                    "{} symbols but {} chromosomes; both sequences must be the same length",
                    symbols.len(),
                    chromosomes.len()
                ),
            ));
        }

        self.result = None;
        let mut records: Vec<MatchRecord> = symbols
            .iter()
            .zip(chromosomes)
            .enumerate()
            .map(|(idx, (symbol, chromosome))| {
                MatchRecord::new(idx + 1, symbol.as_ref(), chromosome.as_ref())
            })
            .collect();

        self.run_cascade(&mut records);

        let result = MatchResult::new(records);
        info!(
            "{} matches, {} unmatched.",
            result.n_matched(),
            result.n_failed()
        );
        Ok(self.result.insert(result))
    }

    /// Read a headerless two-column (symbol, chromosome) file and resolve it.
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&MatchResult, GeneMatchError> {
        let (symbols, chromosomes) = read_symbol_file(path)?;
        self.submit_batch(&symbols, &chromosomes)
    }

    /// Apply every rule to the whole batch, then the override table.
    fn run_cascade(&self, records: &mut [MatchRecord]) {
        for &rule in &self.rules {
            let resolved = apply_rule(&self.reference, rule, records);
            debug!("{}: {} records resolved", rule, resolved);
        }
        let resolved = apply_overrides(records);
        debug!("calendar override: {} records resolved", resolved);
    }
}

/// Apply one rule to every unresolved record; returns how many it resolved.
pub fn apply_rule(
    reference: &GeneReference,
    rule: MatchRule,
    records: &mut [MatchRecord],
) -> usize {
    let mut resolved = 0;
    for record in records.iter_mut().filter(|r| !r.is_resolved()) {
        if let Some(entry) = rule.find(reference, &record.raw_symbol, &record.raw_chromosome) {
            if record.resolve(&entry.symbol, entry.id, MatchSource::Rule(rule)) {
                resolved += 1;
            }
        }
    }
    resolved
}

/// Apply the calendar override table to every unresolved record.
pub fn apply_overrides(records: &mut [MatchRecord]) -> usize {
    let mut resolved = 0;
    for record in records.iter_mut().filter(|r| !r.is_resolved()) {
        if let Some(o) = find_override(&record.raw_symbol, &record.raw_chromosome) {
            if record.resolve(o.symbol, o.id, MatchSource::Override) {
                resolved += 1;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> Matcher {
        Matcher::new(Arc::new(GeneReference::with_test_data()))
    }

    fn source_of(result: &MatchResult, row: usize) -> Option<MatchSource> {
        result.records()[row].source
    }

    #[test]
    fn test_exact_match() {
        let mut m = matcher();
        let result = m.submit_batch(&["TP53"], &["17"]).unwrap();
        let record = &result.records()[0];
        assert_eq!(record.resolved_symbol.as_deref(), Some("TP53"));
        assert_eq!(record.resolved_id, Some(7157));
        assert_eq!(record.source, Some(MatchSource::Rule(MatchRule::ExactSymbol)));
    }

    #[test]
    fn test_cascade_order_per_rule() {
        let mut m = matcher();
        let symbols = ["TP53", "P53", "CSF2RA", "HNPCC1", "1-Mar", "NOPE"];
        let chromosomes = ["17", "17", "X", "2|5", "4", "1"];
        let result = m.submit_batch(&symbols, &chromosomes).unwrap();

        assert_eq!(source_of(result, 0), Some(MatchSource::Rule(MatchRule::ExactSymbol)));
        assert_eq!(
            source_of(result, 1),
            Some(MatchSource::Rule(MatchRule::SynonymExactChromosome))
        );
        assert_eq!(
            source_of(result, 2),
            Some(MatchSource::Rule(MatchRule::SymbolAmbiguousChromosome))
        );
        assert_eq!(
            source_of(result, 3),
            Some(MatchSource::Rule(MatchRule::SynonymAmbiguousChromosome))
        );
        assert_eq!(source_of(result, 4), Some(MatchSource::Override));
        assert_eq!(source_of(result, 5), None);
    }

    #[test]
    fn test_lowercase_synonyms_and_chromosomes() {
        let mut m = matcher();
        let result = m
            .submit_batch(&["her2", "c-myc", "CD116"], &["17", "8", "x"])
            .unwrap();
        let ids: Vec<Option<u64>> = result.records().iter().map(|r| r.resolved_id).collect();
        assert_eq!(ids, vec![Some(2064), Some(4609), Some(1438)]);
        assert_eq!(
            source_of(result, 2),
            Some(MatchSource::Rule(MatchRule::SynonymAmbiguousChromosome))
        );
    }

    #[test]
    fn test_length_mismatch() {
        let mut m = matcher();
        let err = m.submit_batch(&["TP53", "MYC"], &["17"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LengthMismatch);
        assert!(matches!(err, GeneMatchError::InvalidInput { .. }));
    }

    #[test]
    fn test_new_batch_replaces_previous() {
        let mut m = matcher();
        m.submit_batch(&["TP53", "MYC"], &["17", "8"]).unwrap();
        let result = m.submit_batch(&["BRCA1"], &["17"]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(m.result().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_rejected_batch_keeps_previous_result() {
        let mut m = matcher();
        m.submit_batch(&["TP53"], &["17"]).unwrap();
        assert!(m.submit_batch(&["TP53"], &["17", "1"]).is_err());
        assert!(m.result().is_some());
    }

    #[test]
    fn test_empty_batch() {
        let mut m = matcher();
        let empty: [&str; 0] = [];
        let result = m.submit_batch(&empty, &empty).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.n_matched() + result.n_failed(), 0);
    }

    #[test]
    fn test_cascade_beats_override() {
        let mut m = matcher();
        let result = m.submit_batch(&["SEPT9"], &["17"]).unwrap();
        let record = &result.records()[0];
        assert_eq!(record.resolved_symbol.as_deref(), Some("SEPTIN9"));
        assert_eq!(
            record.source,
            Some(MatchSource::Rule(MatchRule::SynonymExactChromosome))
        );
    }

    #[test]
    fn test_apply_rule_skips_resolved() {
        let reference = GeneReference::with_test_data();
        let mut records = vec![MatchRecord::new(1, "TP53", "17")];
        records[0].resolve("KEEP", 1, MatchSource::Override);
        assert_eq!(apply_rule(&reference, MatchRule::ExactSymbol, &mut records), 0);
        assert_eq!(records[0].resolved_symbol.as_deref(), Some("KEEP"));
    }

    #[test]
    fn test_shared_reference() {
        let reference = Arc::new(GeneReference::with_test_data());
        let mut a = Matcher::new(Arc::clone(&reference));
        let mut b = Matcher::new(Arc::clone(&reference));
        let ra = a.submit_batch(&["MYC"], &["8"]).unwrap().clone();
        let rb = b.submit_batch(&["MYC"], &["8"]).unwrap().clone();
        assert_eq!(ra, rb);
        assert_eq!(Arc::strong_count(&reference), 3);
    }
}
