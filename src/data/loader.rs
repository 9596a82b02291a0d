use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{CellValue, Song, SongTable};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a song table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row plus one row per song (the usual export)
/// * `.json` – `[{ "Title": "...", "CCLI": 22025, ... }, ...]`
///
/// The file handle is dropped before returning, on success or failure.
pub fn load_file(path: &Path) -> Result<SongTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let source_name = path.display().to_string();
    let open = || {
        File::open(path).map_err(|source| Error::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })
    };

    let table = match ext.as_str() {
        "csv" => read_csv(BufReader::new(open()?), &source_name)?,
        "json" => read_json(BufReader::new(open()?), &source_name)?,
        other => return Err(Error::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} songs with {} columns from {source_name}",
        table.len(),
        table.columns.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV song table from any stream (e.g. an uploaded file).
///
/// Blank fields become [`CellValue::Null`]. Rows must have as many fields as
/// the header; a ragged row is a parse error.
pub fn read_csv<R: Read>(reader: R, source_name: &str) -> Result<SongTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::parse(source_name, format!("reading header row: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(Error::parse(source_name, "no header row"));
    }
    let headers = dedupe_headers(headers);

    let mut songs = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::parse(source_name, e.to_string()))?;
        let song = Song::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), CellValue::from_field(v))),
        );
        songs.push(song);
    }

    Ok(SongTable::new(headers, songs))
}

/// Make header names unique: a repeated `Name` becomes `Name.1`, `Name.2`, …
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    headers
        .into_iter()
        .map(|h| {
            let mut name = h.clone();
            let mut n = 1;
            while seen.contains(&name) {
                name = format!("{h}.{n}");
                n += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as written by most spreadsheet
/// exporters):
///
/// ```json
/// [
///   { "Id": 1, "Title": "Amazing Grace", "Themes": "Grace, Redemption" },
///   ...
/// ]
/// ```
///
/// Columns are ordered by first appearance across the records.
pub fn read_json<R: Read>(reader: R, source_name: &str) -> Result<SongTable> {
    let root: JsonValue = serde_json::from_reader(reader)
        .map_err(|e| Error::parse(source_name, format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| Error::parse(source_name, "expected top-level JSON array"))?;

    let mut columns: Vec<String> = Vec::new();
    let mut songs = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| Error::parse(source_name, format!("row {i} is not a JSON object")))?;

        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        songs.push(Song::from_pairs(
            obj.iter().map(|(k, v)| (k.clone(), json_to_cell(v))),
        ));
    }

    Ok(SongTable::new(columns, songs))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.is_empty() => CellValue::Null,
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const SPARSE: &str = "Id,Title,Themes,Arrangement 2 Name\n\
                          1,Amazing Grace,\"Grace, Redemption\",\n\
                          2,How Great Thou Art,,Modern\n";

    #[test]
    fn test_read_csv_sparse_rows() {
        let table = read_csv(SPARSE.as_bytes(), "sparse.csv").unwrap();
        assert_eq!(table.columns, vec!["Id", "Title", "Themes", "Arrangement 2 Name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.songs[0].get("Id"), Some(&CellValue::Integer(1)));
        assert_eq!(table.songs[0].themes().as_deref(), Some("Grace, Redemption"));
        assert!(table.songs[0].get("Arrangement 2 Name").is_none());
        assert!(table.songs[1].themes().is_none());
    }

    #[test]
    fn test_read_csv_ragged_row_is_parse_error() {
        let data = "Title,CCLI\nAmazing Grace,22025,extra\n";
        let err = read_csv(data.as_bytes(), "ragged.csv").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_read_csv_empty_input_is_parse_error() {
        let err = read_csv("".as_bytes(), "empty.csv").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_read_csv_invalid_utf8_is_parse_error() {
        let data: &[u8] = b"Title\n\xff\xfe\n";
        let err = read_csv(data, "bad.csv").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_header_only_csv_is_empty_table() {
        let table = read_csv("Title,Themes\n".as_bytes(), "h.csv").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let table = read_csv("Notes,Notes,Notes.1\na,b,c\n".as_bytes(), "dup.csv").unwrap();
        assert_eq!(table.columns, vec!["Notes", "Notes.1", "Notes.1.1"]);
        assert_eq!(table.songs[0].text("Notes.1").as_deref(), Some("b"));
    }

    #[test]
    fn test_read_json_records() {
        let data = r#"[
            {"Title": "Amazing Grace", "CCLI": 22025, "Themes": "Grace"},
            {"Title": "Blessed Be Your Name", "Notes": null, "Extra": true}
        ]"#;
        let table = read_json(data.as_bytes(), "songs.json").unwrap();
        assert_eq!(table.columns, vec!["Title", "CCLI", "Themes", "Notes", "Extra"]);
        assert_eq!(table.songs[0].get("CCLI"), Some(&CellValue::Integer(22025)));
        assert!(table.songs[1].get("CCLI").is_none());
        assert_eq!(table.songs[1].get("Extra"), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn test_read_json_rejects_non_array() {
        let err = read_json(r#"{"Title": "x"}"#.as_bytes(), "obj.json").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_load_file_missing_path() {
        let err = load_file(Path::new("/definitely/not/here/worship_songs.csv")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn test_load_file_unsupported_extension() {
        let err = load_file(Path::new("songs.xlsx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn test_load_file_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SPARSE.as_bytes()).unwrap();
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }
}
