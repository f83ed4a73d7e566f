//! Calendar-name overrides
//!
//! Spreadsheet software turns symbols such as `MARCH1` or `SEPT9` into dates
//! (`1-Mar`, `9-Sep`). The same date can come from two genes (`MARCH1` and
//! `MARC1` both become `1-Mar`), so an override only applies when the
//! chromosome matches too.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One corrective mapping for a date-corrupted gene symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOverride {
    /// Symbol to report
    pub symbol: &'static str,
    /// Gene identifier to report
    pub id: u64,
    /// What a spreadsheet turns the symbol into
    pub spreadsheet_form: &'static str,
    /// Chromosome the raw record must carry
    pub chromosome: &'static str,
}

const fn entry(
    symbol: &'static str,
    id: u64,
    spreadsheet_form: &'static str,
    chromosome: &'static str,
) -> CalendarOverride {
    CalendarOverride {
        symbol,
        id,
        spreadsheet_form,
        chromosome,
    }
}

/// The fixed override table.
pub static CALENDAR_OVERRIDES: [CalendarOverride; 34] = [
    entry("DEC1", 50514, "1-Dec", "9"),
    entry("FEB1", 2233, "1-Feb", "8"),
    entry("FEB10", 100271923, "10-Feb", "3"),
    entry("FEB2", 2234, "2-Feb", "19"),
    entry("FEB5", 619398, "5-Feb", "6"),
    entry("FEB6", 619397, "6-Feb", "18"),
    entry("FEB7", 100049160, "7-Feb", "21"),
    entry("FEB9", 100188849, "9-Feb", "3"),
    entry("MARCH1", 55016, "1-Mar", "4"),
    entry("MARC1", 64757, "1-Mar", "1"),
    entry("MARCH10", 162333, "10-Mar", "17"),
    entry("MARCH11", 441061, "11-Mar", "5"),
    entry("MARCH2", 51257, "2-Mar", "19"),
    entry("MARC2", 54996, "2-Mar", "1"),
    entry("MARCH3", 115123, "3-Mar", "5"),
    entry("MARCH4", 57574, "4-Mar", "2"),
    entry("MARCH5", 54708, "5-Mar", "10"),
    entry("MARCH6", 10299, "6-Mar", "5"),
    entry("MARCH7", 64844, "7-Mar", "2"),
    entry("MARCH8", 220972, "8-Mar", "10"),
    entry("MARCH9", 92979, "9-Mar", "12"),
    entry("SEPT1", 1731, "1-Sep", "16"),
    entry("SEPT10", 151011, "10-Sep", "2"),
    entry("SEPT11", 55752, "11-Sep", "4"),
    entry("SEPT12", 124404, "12-Sep", "16"),
    entry("SEPT14", 346288, "14-Sep", "7"),
    entry("SEPT2", 4735, "2-Sep", "2"),
    entry("SEPT3", 55964, "3-Sep", "22"),
    entry("SEPT4", 5414, "4-Sep", "17"),
    entry("SEPT5", 5413, "5-Sep", "22"),
    entry("SEPT6", 23157, "6-Sep", "X"),
    entry("SEPT7", 989, "7-Sep", "7"),
    entry("SEPT8", 23176, "8-Sep", "5"),
    entry("SEPT9", 10801, "9-Sep", "17"),
];

/// Raw symbol -> overrides, keyed by both the spreadsheet form and the
/// symbol itself.
static OVERRIDE_INDEX: Lazy<HashMap<&'static str, Vec<&'static CalendarOverride>>> =
    Lazy::new(|| {
        let mut index: HashMap<&'static str, Vec<&'static CalendarOverride>> = HashMap::new();
        for o in CALENDAR_OVERRIDES.iter() {
            index.entry(o.spreadsheet_form).or_default().push(o);
            index.entry(o.symbol).or_default().push(o);
        }
        index
    });

impl CalendarOverride {
    /// Whether this override applies to a raw pair.
    pub fn matches(&self, raw_symbol: &str, raw_chromosome: &str) -> bool {
        raw_chromosome == self.chromosome
            && (raw_symbol == self.spreadsheet_form || raw_symbol == self.symbol)
    }
}

/// Look up the override for a raw (symbol, chromosome) pair.
pub fn find_override(raw_symbol: &str, raw_chromosome: &str) -> Option<&'static CalendarOverride> {
    OVERRIDE_INDEX
        .get(raw_symbol)?
        .iter()
        .copied()
        .find(|o| o.chromosome == raw_chromosome)
}
