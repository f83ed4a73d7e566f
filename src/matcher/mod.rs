//! Gene symbol resolution
//!
//! The [`Matcher`] resolves each (symbol, chromosome) pair of a batch with an
//! ordered cascade of [`MatchRule`]s, from the strictest (exact symbol and
//! chromosome) to the loosest (synonym on an overlapping multi-valued
//! chromosome, placeholder gene types excluded). Each rule runs over the
//! whole batch before the next one and only touches records that are still
//! unresolved. Records left over are finally checked against a fixed table
//! of spreadsheet date-corrupted symbols (`1-Mar`, `9-Sep`, ...).
//!
//! When several reference genes satisfy the same rule for one record, the
//! gene loaded first wins.

pub mod engine;
pub mod overrides;
pub mod result;
pub mod rules;

pub use engine::{apply_overrides, apply_rule, Matcher};
pub use overrides::{find_override, CalendarOverride, CALENDAR_OVERRIDES};
pub use result::{FullRow, MatchRecord, MatchResult, MatchSource, MatchSummary};
pub use rules::{ChromosomeMatch, MatchRule, NameKey, DEFAULT_CASCADE};
