use super::model::SongTable;
use super::schema::THEMES_COLUMN;
use super::themes::ALL_THEMES;

// ---------------------------------------------------------------------------
// Theme filter: which rows match the selected themes
// ---------------------------------------------------------------------------

/// Whether a theme selection means "show everything".
pub fn selects_all<S: AsRef<str>>(selected: &[S]) -> bool {
    selected.is_empty() || selected.iter().any(|t| t.as_ref() == ALL_THEMES)
}

/// Return indices of songs passing the theme filter, in source order.
///
/// A song passes when:
/// * The selection is empty or contains [`ALL_THEMES`] → every song passes
/// * Its Themes cell contains any selected theme as a case-insensitive
///   substring ("Grace" matches "Amazing Grace, Redemption")
/// * A blank Themes cell never passes a real filter
pub fn filtered_indices<S: AsRef<str>>(table: &SongTable, selected: &[S]) -> Vec<usize> {
    if selects_all(selected) {
        return table.all_indices();
    }

    let needles: Vec<String> = selected
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .collect();

    let indices: Vec<usize> = table
        .songs
        .iter()
        .enumerate()
        .filter(|(_, song)| match song.text(THEMES_COLUMN) {
            Some(field) => {
                let haystack = field.to_lowercase();
                needles.iter().any(|n| haystack.contains(n.as_str()))
            }
            None => false,
        })
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "Theme filter {:?} kept {} of {} songs",
        needles,
        indices.len(),
        table.len()
    );
    indices
}
