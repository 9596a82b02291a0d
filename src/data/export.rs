use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, TimeZone};

use super::model::SongTable;
use crate::error::{Error, Result};

/// Columns of the summary export, in output order.
pub const SUMMARY_COLUMNS: [&str; 9] = [
    "Title",
    "CCLI",
    "Themes",
    "Arrangement 1 Name",
    "Arrangement 1 BPM",
    "Arrangement 1 Keys",
    "Arrangement 2 Name",
    "Arrangement 2 BPM",
    "Arrangement 2 Keys",
];

/// Which shape of CSV to produce for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Every column of the source table, in source order.
    Full,
    /// The fixed [`SUMMARY_COLUMNS`] projection.
    Summary,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::Full => write!(f, "full"),
            ExportMode::Summary => write!(f, "summary"),
        }
    }
}

impl ExportMode {
    /// The header row this mode writes for `table`.
    ///
    /// Summary mode fails with [`Error::MissingColumns`] naming every
    /// summary column the table lacks.
    pub fn columns(self, table: &SongTable) -> Result<Vec<String>> {
        match self {
            ExportMode::Full => Ok(table.columns.clone()),
            ExportMode::Summary => {
                let missing: Vec<String> = SUMMARY_COLUMNS
                    .iter()
                    .filter(|c| !table.has_column(c))
                    .map(|c| c.to_string())
                    .collect();
                if !missing.is_empty() {
                    return Err(Error::MissingColumns(missing));
                }
                Ok(SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect())
            }
        }
    }
}

/// Write the selected rows of `table` as CSV.
///
/// Blank cells are written as empty fields; quoting follows standard CSV
/// rules. An empty selection yields a header-only file.
pub fn write_selection<W: Write>(
    table: &SongTable,
    rows: &[usize],
    mode: ExportMode,
    writer: W,
) -> Result<()> {
    let columns = mode.columns(table)?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&columns)?;
    for song in table.rows(rows) {
        wtr.write_record(columns.iter().map(|col| {
            song.get(col).map(|v| v.to_string()).unwrap_or_default()
        }))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the selection to `path`, creating or truncating it.
pub fn save_selection(table: &SongTable, rows: &[usize], mode: ExportMode, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_selection(table, rows, mode, BufWriter::new(file))?;
    log::info!("Exported {} songs ({mode}) to {}", rows.len(), path.display());
    Ok(())
}

/// `<prefix>_<mode>_<YYYYMMDD_HHMM>.csv`
pub fn export_file_name<Tz: TimeZone>(prefix: &str, mode: ExportMode, at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{prefix}_{mode}_{}.csv", at.format("%Y%m%d_%H%M"))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::model::{CellValue, Song};
    use crate::data::sample::sample_table;

    fn selection_to_csv(table: &SongTable, rows: &[usize], mode: ExportMode) -> Result<String> {
        let mut buf = Vec::new();
        write_selection(table, rows, mode, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_full_export_round_trip() {
        let mut table = sample_table();
        table.columns.push("Arranger's Notes".into());
        table.songs[1].fields.insert(
            "Arranger's Notes".into(),
            CellValue::Text("Capo 2, \"soft\" intro\nthen full band".into()),
        );
        let table = SongTable::new(table.columns.clone(), table.songs.clone());

        let rows = vec![2, 1];
        let csv = selection_to_csv(&table, &rows, ExportMode::Full).unwrap();
        let back = read_csv(csv.as_bytes(), "export.csv").unwrap();

        assert_eq!(back.columns, table.columns);
        let expected: Vec<Song> = table.rows(&rows).cloned().collect();
        assert_eq!(back.songs, expected);
    }

    #[test]
    fn test_summary_has_fixed_columns() {
        let mut table = sample_table();
        table.columns.reverse();
        let csv = selection_to_csv(&table, &[0], ExportMode::Summary).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(SUMMARY_COLUMNS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("Amazing Grace,22025,\"Grace, Redemption\",Traditional,80,G,,,")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_summary_missing_columns_is_error() {
        let table = SongTable::new(
            vec!["Title".into(), "Themes".into()],
            vec![Song::default()],
        );
        match selection_to_csv(&table, &[0], ExportMode::Summary) {
            Err(Error::MissingColumns(missing)) => {
                assert_eq!(missing.len(), 7);
                assert_eq!(missing[0], "CCLI");
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
        // Full export still works for the same table.
        assert!(selection_to_csv(&table, &[0], ExportMode::Full).is_ok());
    }

    #[test]
    fn test_empty_selection_is_header_only() {
        let table = sample_table();
        let csv = selection_to_csv(&table, &[], ExportMode::Summary).unwrap();
        assert_eq!(csv, format!("{}\n", SUMMARY_COLUMNS.join(",")));
    }

    #[test]
    fn test_blank_cells_are_empty_fields() {
        let table = SongTable::new(
            vec!["Title".into(), "Notes".into()],
            vec![Song::from_pairs([("Title", CellValue::Text("X".into()))])],
        );
        let csv = selection_to_csv(&table, &[0], ExportMode::Full).unwrap();
        assert_eq!(csv, "Title,Notes\nX,\n");
    }

    #[test]
    fn test_save_selection_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_selection(&sample_table(), &[0, 1], ExportMode::Full, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_export_file_name() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 10, 19, 15, 30, 59)
            .unwrap();
        assert_eq!(
            export_file_name("selected_songs", ExportMode::Full, &at),
            "selected_songs_full_20241019_1530.csv"
        );
        assert_eq!(
            export_file_name("selected_songs", ExportMode::Summary, &at),
            "selected_songs_summary_20241019_1530.csv"
        );
    }
}
