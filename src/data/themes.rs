use std::collections::BTreeSet;

use super::model::SongTable;
use super::schema::THEMES_COLUMN;

/// Sentinel theme meaning "do not filter".
pub const ALL_THEMES: &str = "All";

/// Split a free-text themes field into trimmed, non-empty tags.
pub fn split_themes(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Distinct themes across the table, sorted, with [`ALL_THEMES`] first.
///
/// Case is preserved, so "grace" and "Grace" are separate entries. Rows with
/// a blank Themes cell contribute nothing.
pub fn theme_index(table: &SongTable) -> Vec<String> {
    let mut themes: BTreeSet<String> = BTreeSet::new();
    for song in &table.songs {
        if let Some(field) = song.text(THEMES_COLUMN) {
            themes.extend(split_themes(&field).map(str::to_string));
        }
    }
    std::iter::once(ALL_THEMES.to_string())
        .chain(themes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Song};
    use crate::data::sample::sample_table;

    fn themes_table(values: &[Option<&str>]) -> SongTable {
        let songs = values
            .iter()
            .map(|v| {
                Song::from_pairs([(
                    THEMES_COLUMN,
                    v.map(|s| CellValue::Text(s.to_string()))
                        .unwrap_or(CellValue::Null),
                )])
            })
            .collect();
        SongTable::new(vec![THEMES_COLUMN.to_string()], songs)
    }

    #[test]
    fn test_sample_dataset_index() {
        let index = theme_index(&sample_table());
        assert_eq!(
            index,
            vec!["All", "Contemporary", "Grace", "Praise", "Redemption", "Trust", "Worship"]
        );
    }

    #[test]
    fn test_blank_pieces_and_nulls_are_skipped() {
        let table = themes_table(&[Some(" Hope ,, ,Love"), None, Some("   ")]);
        assert_eq!(theme_index(&table), vec!["All", "Hope", "Love"]);
    }

    #[test]
    fn test_case_is_preserved() {
        let table = themes_table(&[Some("grace"), Some("Grace")]);
        assert_eq!(theme_index(&table), vec!["All", "Grace", "grace"]);
    }

    #[test]
    fn test_order_independent() {
        let forward = themes_table(&[Some("B, A"), Some("C"), Some("A")]);
        let reversed = themes_table(&[Some("A"), Some("C"), Some("B, A")]);
        assert_eq!(theme_index(&forward), theme_index(&reversed));
        assert_eq!(theme_index(&forward), theme_index(&forward));
    }

    #[test]
    fn test_no_themes_column() {
        let table = SongTable::new(vec!["Title".into()], vec![Song::default()]);
        assert_eq!(theme_index(&table), vec!["All"]);
    }
}
