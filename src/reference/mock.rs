//! Small built-in reference for tests and examples

use crate::reference::entry::GeneEntry;
use crate::reference::loader::GeneReference;

impl GeneReference {
    /// Create a reference with a handful of well-known genes.
    ///
    /// Covers exact symbols, synonyms, a multi-chromosome gene (`CSF2RA` on
    /// `X|Y`), a pseudogene loaded ahead of the real gene sharing its synonym
    /// (`KRASP2`/`KRAS`), and `SEPTIN9`, whose old name is also in the
    /// calendar override table.
    pub fn with_test_data() -> Self {
        let entries = vec![
            GeneEntry::new(7157, "TP53", "17")
                .with_synonyms("BCC7|LFS1|P53|TRP53")
                .with_gene_type("protein-coding"),
            GeneEntry::new(672, "BRCA1", "17")
                .with_synonyms("BRCAI|BRCC1|FANCS|RNF53")
                .with_gene_type("protein-coding"),
            GeneEntry::new(2064, "ERBB2", "17")
                .with_synonyms("CD340|HER-2|HER2|NEU")
                .with_gene_type("protein-coding"),
            GeneEntry::new(4609, "MYC", "8")
                .with_synonyms("MRTL|MYCC|bHLHe39|c-Myc")
                .with_gene_type("protein-coding"),
            GeneEntry::new(4436, "MSH2", "2")
                .with_synonyms("COCA1|FCC1|HNPCC|HNPCC1|LCFS2")
                .with_gene_type("protein-coding"),
            GeneEntry::new(1438, "CSF2RA", "X|Y")
                .with_synonyms("CD116|CDw116|CSF2R|CSF2RAX|CSF2RAY")
                .with_gene_type("protein-coding"),
            GeneEntry::new(100_000_001, "KRASP2", "12")
                .with_synonyms("RASK2")
                .with_gene_type("pseudo"),
            GeneEntry::new(3845, "KRAS", "12")
                .with_synonyms("C-K-RAS|KI-RAS|KRAS2|RASK2")
                .with_gene_type("protein-coding"),
            GeneEntry::new(10801, "SEPTIN9", "17")
                .with_synonyms("MSF|SEPT9|SINT1")
                .with_gene_type("protein-coding"),
        ];

        Self::from_entries(entries).unwrap_or_else(|e| unreachable!("built-in reference: {e}"))
    }
}
