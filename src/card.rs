use crate::data::model::{Arrangement, CellValue, Song};

// ---------------------------------------------------------------------------
// Song card: display-ready sections for one selected song
// ---------------------------------------------------------------------------

/// How a chord chart cell should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordChart {
    /// Actual chart text, shown verbatim in monospace.
    Content(String),
    /// A yes/no style marker, shown as "Has Chord Chart: …".
    Flag(String),
}

impl ChordChart {
    /// Values like "Yes", "no", "TRUE" only say whether a chart exists.
    pub fn classify(value: &str) -> Self {
        let marker = value.trim().to_lowercase();
        if matches!(marker.as_str(), "" | "yes" | "no" | "true" | "false") {
            ChordChart::Flag(value.to_string())
        } else {
            ChordChart::Content(value.to_string())
        }
    }
}

/// One arrangement section of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangementCard {
    pub heading: String,
    /// Name, BPM, Length, Keys, Chord Chart Key, with the placeholder for blanks.
    pub fields: Vec<(&'static str, String)>,
    pub chord_chart: Option<ChordChart>,
    /// Present tags joined by ", ".
    pub tags: Option<String>,
    pub notes: Option<String>,
}

/// Everything needed to render one song, independent of the UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongCard {
    pub heading: String,
    pub fields: Vec<(&'static str, String)>,
    pub themes: Option<String>,
    pub notes: Option<String>,
    /// Only arrangements that have a name.
    pub arrangements: Vec<ArrangementCard>,
}

impl SongCard {
    /// Format `song` as the `index`-th card (1-based). Blank cells in the
    /// always-shown fields render as `missing`.
    pub fn build(song: &Song, index: usize, missing: &str) -> Self {
        let show = |col: &str| song.text(col).unwrap_or_else(|| missing.to_string());

        let fields = vec![
            ("Title", song.title().unwrap_or_else(|| missing.to_string())),
            ("CCLI", show("CCLI")),
            ("ID", show("Id")),
            ("Song Tag", show("Song Tag 1")),
            ("Last Scheduled", show("Last Scheduled Data")),
        ];

        let arrangements = (0..2)
            .map(|slot| song.arrangement(slot))
            .filter(|arr| arr.is_present())
            .map(|arr| arrangement_card(&arr, missing))
            .collect();

        SongCard {
            heading: format!("Song {index}"),
            fields,
            themes: song.themes(),
            notes: song.text("Notes"),
            arrangements,
        }
    }
}

fn arrangement_card(arr: &Arrangement<'_>, missing: &str) -> ArrangementCard {
    let show = |v: Option<&CellValue>| v.map(|v| v.to_string()).unwrap_or_else(|| missing.to_string());

    let tags: Vec<String> = arr.tags.iter().map(|t| t.to_string()).collect();

    ArrangementCard {
        heading: format!("Arrangement {}", arr.number),
        fields: vec![
            ("Name", show(arr.name)),
            ("BPM", show(arr.bpm)),
            ("Length", show(arr.length)),
            ("Keys", show(arr.keys)),
            ("Chord Chart Key", show(arr.chord_chart_key)),
        ],
        chord_chart: arr.chord_chart.map(|v| ChordChart::classify(&v.to_string())),
        tags: (!tags.is_empty()).then(|| tags.join(", ")),
        notes: arr.notes.map(|v| v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_table;

    #[test]
    fn test_chord_chart_classify() {
        assert_eq!(ChordChart::classify("Yes"), ChordChart::Flag("Yes".into()));
        assert_eq!(ChordChart::classify(" FALSE "), ChordChart::Flag(" FALSE ".into()));
        assert_eq!(
            ChordChart::classify("G  C  D\nEm C G"),
            ChordChart::Content("G  C  D\nEm C G".into())
        );
    }

    #[test]
    fn test_card_for_single_arrangement_song() {
        let table = sample_table();
        let card = SongCard::build(&table.songs[0], 1, "N/A");
        assert_eq!(card.heading, "Song 1");
        assert_eq!(card.fields[0], ("Title", "Amazing Grace".to_string()));
        assert_eq!(card.themes.as_deref(), Some("Grace, Redemption"));
        assert_eq!(card.arrangements.len(), 1);

        let arr = &card.arrangements[0];
        assert_eq!(arr.heading, "Arrangement 1");
        assert_eq!(arr.chord_chart, Some(ChordChart::Flag("Yes".into())));
        assert_eq!(arr.tags.as_deref(), Some("Slow, Reflective"));
        assert_eq!(arr.notes.as_deref(), Some("Piano only"));
    }

    #[test]
    fn test_placeholder_is_a_parameter() {
        let song = Song::from_pairs([
            ("Title", CellValue::Text("Untitled Hymn".into())),
            ("Arrangement 2 Name", CellValue::Text("Acoustic".into())),
        ]);
        let card = SongCard::build(&song, 3, "?");
        assert_eq!(card.fields[1], ("CCLI", "?".to_string()));
        assert!(card.themes.is_none());
        assert!(card.notes.is_none());

        assert_eq!(card.arrangements.len(), 1);
        let arr = &card.arrangements[0];
        assert_eq!(arr.heading, "Arrangement 2");
        assert_eq!(arr.fields[1], ("BPM", "?".to_string()));
        assert!(arr.chord_chart.is_none());
        assert!(arr.tags.is_none());
    }
}
