//! CLI utilities for ferro-gene-matcher
//!
//! This module provides testable functions used by the CLI binary.
//! Output rendering lives here so it can be unit tested without running
//! the binary end to end.

pub mod format;

pub use format::{output_error, output_maf_report, output_match_report, OutputFormat};
