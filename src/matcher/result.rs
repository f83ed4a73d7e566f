//! Per-record outcomes and the three result views of a batch.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matcher::rules::MatchRule;

/// Which step of the cascade resolved a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// A rule of the cascade
    Rule(MatchRule),
    /// The calendar-name override table
    Override,
}

impl MatchSource {
    /// Short stable label
    pub fn label(self) -> &'static str {
        match self {
            MatchSource::Rule(rule) => rule.label(),
            MatchSource::Override => "calendar_override",
        }
    }
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSource::Rule(rule) => write!(f, "{}", rule),
            MatchSource::Override => write!(f, "calendar override"),
        }
    }
}

/// One input row and its resolution state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 1-based position in the submitted batch
    pub row_id: usize,
    /// Symbol as submitted
    pub raw_symbol: String,
    /// Chromosome as submitted
    pub raw_chromosome: String,
    /// Canonical symbol, once resolved
    pub resolved_symbol: Option<String>,
    /// Gene identifier, once resolved
    pub resolved_id: Option<u64>,
    /// Step that resolved this record
    pub source: Option<MatchSource>,
}

impl MatchRecord {
    /// Create an unresolved record.
    pub fn new(
        row_id: usize,
        raw_symbol: impl Into<String>,
        raw_chromosome: impl Into<String>,
    ) -> Self {
        Self {
            row_id,
            raw_symbol: raw_symbol.into(),
            raw_chromosome: raw_chromosome.into(),
            resolved_symbol: None,
            resolved_id: None,
            source: None,
        }
    }

    /// Whether a cascade step has resolved this record
    pub fn is_resolved(&self) -> bool {
        self.resolved_symbol.is_some()
    }

    /// Record a resolution. Already-resolved records are left untouched;
    /// returns whether the record changed.
    pub fn resolve(&mut self, symbol: &str, id: u64, source: MatchSource) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.resolved_symbol = Some(symbol.to_string());
        self.resolved_id = Some(id);
        self.source = Some(source);
        true
    }

    /// Best-effort row: unresolved records keep their raw symbol and get id 0.
    pub fn to_full_row(&self) -> FullRow {
        FullRow {
            user_symbol: self.raw_symbol.clone(),
            chromosome: self.raw_chromosome.clone(),
            hugo: self
                .resolved_symbol
                .clone()
                .unwrap_or_else(|| self.raw_symbol.clone()),
            entrez_id: self.resolved_id.unwrap_or(0),
        }
    }
}

/// A row of the `full` view, named after the exported columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullRow {
    /// Symbol as submitted
    pub user_symbol: String,
    /// Chromosome as submitted
    pub chromosome: String,
    /// Resolved symbol, or the submitted one
    pub hugo: String,
    /// Resolved identifier, or 0
    pub entrez_id: u64,
}

/// Counts for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Records submitted
    pub total: usize,
    /// Records resolved
    pub matched: usize,
    /// Records left unresolved
    pub failed: usize,
    /// Resolved records per cascade step label
    pub by_source: BTreeMap<String, usize>,
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} matches, {} unmatched.", self.matched, self.failed)
    }
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    records: Vec<MatchRecord>,
}

impl MatchResult {
    pub(crate) fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    /// Every record, in submission order
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Every record with defaults filled in
    pub fn full(&self) -> Vec<FullRow> {
        self.records.iter().map(MatchRecord::to_full_row).collect()
    }

    /// Resolved records only
    pub fn matched(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| r.is_resolved())
    }

    /// Unresolved records only (their id stays absent)
    pub fn failed(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| !r.is_resolved())
    }

    /// Number of resolved records
    pub fn n_matched(&self) -> usize {
        self.matched().count()
    }

    /// Number of unresolved records
    pub fn n_failed(&self) -> usize {
        self.failed().count()
    }

    /// Batch size
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch was empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts, including how many records each cascade step resolved
    pub fn summary(&self) -> MatchSummary {
        let mut by_source = BTreeMap::new();
        for source in self.records.iter().filter_map(|r| r.source) {
            *by_source.entry(source.label().to_string()).or_insert(0) += 1;
        }
        let matched = self.n_matched();
        MatchSummary {
            total: self.len(),
            matched,
            failed: self.len() - matched,
            by_source,
        }
    }
}
