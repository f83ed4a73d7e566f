//! Gene reference data
//!
//! The reference is a static table of canonical genes loaded once and never
//! mutated afterwards. [`GeneReference`] owns the entries and the lookup
//! indexes the matcher needs.

pub mod entry;
pub mod loader;
pub mod mock;

pub use entry::GeneEntry;
pub use loader::GeneReference;
