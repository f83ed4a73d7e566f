//! Locating the required MAF columns by name pattern.

use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GeneMatchError;

/// Required columns: (case-insensitive pattern, name used in the output).
pub const REQUIRED_COLUMNS: [(&str, &str); 5] = [
    (r"\bhugo", "Hugo_Symbol"),
    (r"\bchr", "Chromosome"),
    (r"\bentrez", "Entrez_Gene_Id"),
    (r"\bstart_pos", "Start_Position"),
    (r"\bend_pos", "End_Position"),
];

static COLUMN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    REQUIRED_COLUMNS
        .iter()
        .map(|(pattern, _)| Regex::new(&format!("(?i){}", pattern)).unwrap())
        .collect()
});

/// Positions of the required columns in a MAF header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MafColumns {
    /// Gene symbol column
    pub hugo: usize,
    /// Chromosome column
    pub chromosome: usize,
    /// Gene id column
    pub entrez: usize,
    /// Start position column
    pub start_position: usize,
    /// End position column
    pub end_position: usize,
}

impl MafColumns {
    /// Column positions in [`REQUIRED_COLUMNS`] order.
    pub fn positions(&self) -> [usize; 5] {
        [
            self.hugo,
            self.chromosome,
            self.entrez,
            self.start_position,
            self.end_position,
        ]
    }

    /// Copy of `headers` with the required columns given their standard names.
    pub fn renamed_headers(&self, headers: &StringRecord) -> StringRecord {
        let positions = self.positions();
        headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                positions
                    .iter()
                    .position(|&p| p == i)
                    .map(|k| REQUIRED_COLUMNS[k].1)
                    .unwrap_or(name)
            })
            .collect()
    }
}

/// Find each required column; the first header matching a pattern wins.
pub fn locate_columns(headers: &StringRecord) -> Result<MafColumns, GeneMatchError> {
    let mut found = [0usize; 5];
    for (k, regex) in COLUMN_PATTERNS.iter().enumerate() {
        found[k] = headers
            .iter()
            .position(|name| regex.is_match(name))
            .ok_or_else(|| GeneMatchError::ColumnNotFound {
                pattern: REQUIRED_COLUMNS[k].0.to_string(),
            })?;
    }
    Ok(MafColumns {
        hugo: found[0],
        chromosome: found[1],
        entrez: found[2],
        start_position: found[3],
        end_position: found[4],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_standard_maf_header() {
        let h = headers(&[
            "Hugo_Symbol",
            "Entrez_Gene_Id",
            "Center",
            "NCBI_Build",
            "Chromosome",
            "Start_Position",
            "End_Position",
        ]);
        let columns = locate_columns(&h).unwrap();
        assert_eq!(columns.hugo, 0);
        assert_eq!(columns.entrez, 1);
        assert_eq!(columns.chromosome, 4);
        assert_eq!(columns.start_position, 5);
        assert_eq!(columns.end_position, 6);
    }

    #[test]
    fn test_nonstandard_names_are_renamed() {
        let h = headers(&["gene", "HUGO_SYMBOL", "chr", "entrez_id", "start_pos", "end_pos"]);
        let columns = locate_columns(&h).unwrap();
        assert_eq!(columns.hugo, 1);
        let renamed = columns.renamed_headers(&h);
        let renamed: Vec<&str> = renamed.iter().collect();
        assert_eq!(
            renamed,
            vec![
                "gene",
                "Hugo_Symbol",
                "Chromosome",
                "Entrez_Gene_Id",
                "Start_Position",
                "End_Position"
            ]
        );
    }

    #[test]
    fn test_word_boundary_required() {
        // "thugo" does not start a word with "hugo"
        let h = headers(&["thugo", "Chromosome", "Entrez", "Start_Pos", "End_Pos"]);
        let err = locate_columns(&h).unwrap_err();
        assert_eq!(
            err,
            GeneMatchError::ColumnNotFound {
                pattern: r"\bhugo".to_string()
            }
        );
    }

    #[test]
    fn test_missing_entrez() {
        let h = headers(&["Hugo_Symbol", "Chromosome", "Start_Position", "End_Position"]);
        let err = locate_columns(&h).unwrap_err();
        assert!(err.to_string().contains(r"\bentrez"));
    }

    #[rstest]
    #[case(&["Chromosome", "Entrez_Gene_Id", "Start_Position", "End_Position"], r"\bhugo")]
    #[case(&["Hugo_Symbol", "Entrez_Gene_Id", "Start_Position", "End_Position"], r"\bchr")]
    #[case(&["Hugo_Symbol", "Chromosome", "Entrez_Gene_Id", "End_Position"], r"\bstart_pos")]
    #[case(&["Hugo_Symbol", "Chromosome", "Entrez_Gene_Id", "Start_Position"], r"\bend_pos")]
    #[case(
        &["Hugo_Symbol", "Chromosome", "Entrez_Gene_Id", "Start", "End_Position"],
        r"\bstart_pos"
    )]
    fn test_first_missing_pattern_reported(#[case] names: &[&str], #[case] pattern: &str) {
        let err = locate_columns(&headers(names)).unwrap_err();
        assert_eq!(
            err,
            GeneMatchError::ColumnNotFound {
                pattern: pattern.to_string()
            }
        );
    }
}
