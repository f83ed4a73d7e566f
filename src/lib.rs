// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-gene-matcher: gene symbol resolver
//!
//! Part of the ferro bioinformatics toolkit. Resolves user-supplied
//! (symbol, chromosome) pairs to canonical gene symbols and identifiers
//! through a fixed cascade of matching rules, with a final table that
//! repairs symbols spreadsheet software turned into dates.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ferro_gene_matcher::{GeneReference, Matcher, MatchSource};
//!
//! // Create a matcher with test data
//! let reference = Arc::new(GeneReference::with_test_data());
//! let mut matcher = Matcher::new(reference);
//!
//! // Resolve a batch
//! let result = matcher
//!     .submit_batch(&["TP53", "HER2", "1-Mar"], &["17", "17", "4"])
//!     .unwrap();
//!
//! for row in result.full() {
//!     println!("{} -> {} ({})", row.user_symbol, row.hugo, row.entrez_id);
//! }
//! assert_eq!(result.n_matched(), 3);
//! assert_eq!(result.records()[2].source, Some(MatchSource::Override));
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod maf;
pub mod matcher;
pub mod reference;

// Re-export commonly used types
pub use error::{ErrorCode, GeneMatchError};
pub use matcher::{
    FullRow, MatchRecord, MatchResult, MatchRule, MatchSource, MatchSummary, Matcher,
};
pub use reference::{GeneEntry, GeneReference};

/// Result type alias for ferro-gene-matcher operations
pub type Result<T> = std::result::Result<T, GeneMatchError>;
