use std::collections::BTreeMap;
use std::fmt;

use super::schema::{ArrangementColumns, ARRANGEMENTS};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the song spreadsheet
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell.
///
/// Numbers and booleans are only recognised when their rendering matches the
/// input text exactly, so `Display` always reproduces what was read.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret a raw CSV field. Empty fields are [`CellValue::Null`].
    pub fn from_field(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            if i.to_string() == s {
                return CellValue::Integer(i);
            }
        }
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() && v.to_string() == s {
                return CellValue::Float(v);
            }
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Song – one row of the spreadsheet
// ---------------------------------------------------------------------------

/// A single song (one row of the source table).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Song {
    /// column_name → value. Every table column has an entry; blanks are `Null`.
    pub fields: BTreeMap<String, CellValue>,
}

impl Song {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        Song {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The value of `column`, or `None` when the column is missing or blank.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column).filter(|v| !v.is_null())
    }

    /// Rendered text of `column`, or `None` when absent.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(|v| v.to_string())
    }

    pub fn title(&self) -> Option<String> {
        self.text("Title")
    }

    pub fn themes(&self) -> Option<String> {
        self.text("Themes")
    }

    /// Typed view of arrangement `slot` (0 or 1). Out-of-range slots are
    /// treated as an arrangement with every field absent.
    pub fn arrangement(&self, slot: usize) -> Arrangement<'_> {
        match ARRANGEMENTS.get(slot) {
            Some(cols) => Arrangement::read(self, slot + 1, cols),
            None => Arrangement {
                number: slot + 1,
                ..Arrangement::default()
            },
        }
    }
}

/// A borrowed, typed view over one arrangement's columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement<'a> {
    /// 1-based arrangement number.
    pub number: usize,
    pub name: Option<&'a CellValue>,
    pub bpm: Option<&'a CellValue>,
    pub length: Option<&'a CellValue>,
    pub notes: Option<&'a CellValue>,
    pub keys: Option<&'a CellValue>,
    pub chord_chart: Option<&'a CellValue>,
    pub chord_chart_key: Option<&'a CellValue>,
    /// Present tags only, in column order.
    pub tags: Vec<&'a CellValue>,
}

impl<'a> Arrangement<'a> {
    fn read(song: &'a Song, number: usize, cols: &ArrangementColumns) -> Self {
        Arrangement {
            number,
            name: song.get(cols.name),
            bpm: song.get(cols.bpm),
            length: song.get(cols.length),
            notes: song.get(cols.notes),
            keys: song.get(cols.keys),
            chord_chart: song.get(cols.chord_chart),
            chord_chart_key: song.get(cols.chord_chart_key),
            tags: cols.tags.iter().filter_map(|c| song.get(c)).collect(),
        }
    }

    /// An arrangement is shown only when it has a name.
    pub fn is_present(&self) -> bool {
        self.name.is_some()
    }
}

// ---------------------------------------------------------------------------
// SongTable – the complete loaded spreadsheet
// ---------------------------------------------------------------------------

/// The full parsed song table. Rows are never mutated after load; filters
/// and samples refer to rows by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongTable {
    /// All songs (rows), in source order.
    pub songs: Vec<Song>,
    /// Column names in source order.
    pub columns: Vec<String>,
}

impl SongTable {
    /// Build a table, filling in `Null` for any column a row lacks.
    pub fn new(columns: Vec<String>, songs: Vec<Song>) -> Self {
        let songs = songs
            .into_iter()
            .map(|mut song| {
                for col in &columns {
                    song.fields.entry(col.clone()).or_insert(CellValue::Null);
                }
                song
            })
            .collect();
        SongTable { songs, columns }
    }

    /// Number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Every row index, in order.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.songs.len()).collect()
    }

    /// Iterate the songs behind `indices`, skipping any that are out of range.
    pub fn rows<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a Song> + 'a {
        indices.iter().filter_map(|&i| self.songs.get(i))
    }

    /// How many of the `indices` rows have a non-blank `column`.
    pub fn count_present(&self, indices: &[usize], column: &str) -> usize {
        self.rows(indices).filter(|s| s.get(column).is_some()).count()
    }
}
