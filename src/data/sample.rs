use std::io::Write;

use super::model::{CellValue, Song, SongTable};
use super::schema::EXPECTED_COLUMNS;
use crate::error::Result;

/// File name offered when saving the sample spreadsheet.
pub const SAMPLE_FILE_NAME: &str = "sample_worship_songs.csv";

/// Cells of the sample spreadsheet, one row per song, in
/// [`EXPECTED_COLUMNS`] order. Empty strings are blank cells.
const SAMPLE_ROWS: [[&str; 23]; 3] = [
    [
        "1", "Amazing Grace", "22025", "Grace, Redemption", "Classic hymn", "2024-01-15", "Hymn",
        "Traditional", "80", "4:30", "Piano only", "G", "Yes", "G", "Slow", "Reflective",
        "", "", "", "", "", "", "",
    ],
    [
        "2", "How Great Thou Art", "14181", "Praise, Worship", "Traditional favorite",
        "2024-02-03", "Hymn", "Classic", "85", "5:15", "Organ preferred", "C", "Yes", "C",
        "Medium", "Majestic", "Modern", "95", "4:45", "Contemporary style", "D", "Yes", "D",
    ],
    [
        "3", "Blessed Be Your Name", "3798438", "Worship, Trust, Contemporary",
        "Contemporary worship", "2024-01-28", "Contemporary", "Full Band", "78", "4:45",
        "Electric guitar lead", "D", "Yes", "D", "Medium", "Uplifting", "Acoustic", "72",
        "5:00", "Acoustic guitar focus", "C", "Yes", "C",
    ],
];

/// The three-song demo table with the full canonical schema.
pub fn sample_table() -> SongTable {
    let songs = SAMPLE_ROWS
        .iter()
        .map(|row| {
            Song::from_pairs(
                EXPECTED_COLUMNS
                    .iter()
                    .zip(row.iter())
                    .map(|(col, cell)| (*col, CellValue::from_field(cell))),
            )
        })
        .collect();
    SongTable::new(EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect(), songs)
}

/// Write the demo table as CSV.
pub fn write_sample_csv<W: Write>(writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPECTED_COLUMNS)?;
    for row in &SAMPLE_ROWS {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::schema::validate;

    #[test]
    fn test_sample_table_shape() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert!(validate(&table).is_complete());
        assert!(table.songs[0].arrangement(1).name.is_none());
        assert_eq!(table.songs[2].title().as_deref(), Some("Blessed Be Your Name"));
    }

    #[test]
    fn test_sample_csv_loads_back_to_sample_table() {
        let mut buf = Vec::new();
        write_sample_csv(&mut buf).unwrap();
        let loaded = read_csv(buf.as_slice(), SAMPLE_FILE_NAME).unwrap();
        assert_eq!(loaded, sample_table());
    }
}
