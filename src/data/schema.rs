use super::model::SongTable;

// ---------------------------------------------------------------------------
// Canonical column contract
// ---------------------------------------------------------------------------

/// The 23 columns a song spreadsheet is expected to have, in canonical order.
/// Names are the file contract and are matched verbatim.
pub const EXPECTED_COLUMNS: [&str; 23] = [
    "Id",
    "Title",
    "CCLI",
    "Themes",
    "Notes",
    "Last Scheduled Data",
    "Song Tag 1",
    "Arrangement 1 Name",
    "Arrangement 1 BPM",
    "Arrangement 1 Length",
    "Arrangement 1 Notes",
    "Arrangement 1 Keys",
    "Arrangement 1 Chord Chart",
    "Arrangement 1 Chord Chart Key",
    "Arrangement 1 Tag 1",
    "Arrangement 1 Tag 2",
    "Arrangement 2 Name",
    "Arrangement 2 BPM",
    "Arrangement 2 Length.",
    "Arrangement 2 Notes",
    "Arrangement 2 Keys",
    "Arrangement 2 Chord Chart",
    "Arrangement 2 Chord Chart Key",
];

/// Column holding the comma-separated theme tags.
pub const THEMES_COLUMN: &str = "Themes";

/// Column names making up one arrangement sub-record.
#[derive(Debug)]
pub struct ArrangementColumns {
    pub name: &'static str,
    pub bpm: &'static str,
    pub length: &'static str,
    pub notes: &'static str,
    pub keys: &'static str,
    pub chord_chart: &'static str,
    pub chord_chart_key: &'static str,
    pub tags: &'static [&'static str],
}

pub const ARRANGEMENTS: [ArrangementColumns; 2] = [
    ArrangementColumns {
        name: "Arrangement 1 Name",
        bpm: "Arrangement 1 BPM",
        length: "Arrangement 1 Length",
        notes: "Arrangement 1 Notes",
        keys: "Arrangement 1 Keys",
        chord_chart: "Arrangement 1 Chord Chart",
        chord_chart_key: "Arrangement 1 Chord Chart Key",
        tags: &["Arrangement 1 Tag 1", "Arrangement 1 Tag 2"],
    },
    ArrangementColumns {
        name: "Arrangement 2 Name",
        bpm: "Arrangement 2 BPM",
        length: "Arrangement 2 Length.",
        notes: "Arrangement 2 Notes",
        keys: "Arrangement 2 Keys",
        chord_chart: "Arrangement 2 Chord Chart",
        chord_chart_key: "Arrangement 2 Chord Chart Key",
        tags: &[],
    },
];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Advisory result of comparing a table's columns against
/// [`EXPECTED_COLUMNS`]. Never blocks loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Canonical columns the table lacks, in canonical order.
    pub missing: Vec<String>,
    /// Table columns outside the canonical set, in table order.
    pub extra: Vec<String>,
}

impl SchemaReport {
    /// True when every canonical column is present.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Emit the findings through the log facade.
    pub fn log(&self) {
        if !self.missing.is_empty() {
            log::warn!("Missing expected columns: {}", self.missing.join(", "));
        }
        if !self.extra.is_empty() {
            log::info!("Extra columns found: {}", self.extra.join(", "));
        }
    }
}

/// Compare the table's columns against the canonical schema.
pub fn validate(table: &SongTable) -> SchemaReport {
    let missing = EXPECTED_COLUMNS
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect();
    let extra = table
        .columns
        .iter()
        .filter(|col| !EXPECTED_COLUMNS.contains(&col.as_str()))
        .cloned()
        .collect();
    SchemaReport { missing, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(columns: &[&str]) -> SongTable {
        SongTable::new(columns.iter().map(|c| c.to_string()).collect(), Vec::new())
    }

    #[test]
    fn test_full_schema_is_complete() {
        let report = validate(&table_with(&EXPECTED_COLUMNS));
        assert!(report.is_complete());
        assert!(report.extra.is_empty());
    }

    #[test]
    fn test_missing_ccli_only() {
        let cols: Vec<&str> = EXPECTED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "CCLI")
            .collect();
        let report = validate(&table_with(&cols));
        assert_eq!(report.missing, vec!["CCLI".to_string()]);
        assert!(report.extra.is_empty());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_missing_in_canonical_order_extra_in_table_order() {
        let report = validate(&table_with(&["Zeta", "Title", "Alpha"]));
        assert_eq!(report.extra, vec!["Zeta".to_string(), "Alpha".to_string()]);
        assert_eq!(report.missing.len(), 22);
        assert_eq!(report.missing[0], "Id");
        assert_eq!(report.missing[1], "CCLI");
        assert_eq!(report.missing.last().map(String::as_str), Some("Arrangement 2 Chord Chart Key"));
    }

    #[test]
    fn test_arrangement_columns_are_canonical() {
        for arr in &ARRANGEMENTS {
            for col in [arr.name, arr.bpm, arr.length, arr.notes, arr.keys, arr.chord_chart, arr.chord_chart_key]
                .iter()
                .chain(arr.tags.iter())
            {
                assert!(EXPECTED_COLUMNS.contains(col), "{col} not canonical");
            }
        }
    }
}
