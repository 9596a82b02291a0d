use std::collections::BTreeSet;
use std::path::Path;

use crate::config::SelectorConfig;
use crate::data::export::{save_selection, ExportMode};
use crate::data::filter::filtered_indices;
use crate::data::loader::load_file;
use crate::data::model::SongTable;
use crate::data::sampler::{draw, DrawNotice};
use crate::data::schema::{validate, SchemaReport};
use crate::data::themes::{theme_index, ALL_THEMES};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
pub struct AppState {
    pub config: SelectorConfig,

    /// Loaded table (None until a file loads successfully).
    pub table: Option<SongTable>,

    /// Where the current table came from.
    pub source_label: Option<String>,

    /// Schema findings for the current table.
    pub schema_report: Option<SchemaReport>,

    /// "All" followed by the table's distinct themes.
    pub theme_options: Vec<String>,

    /// Themes ticked in the filter panel.
    pub selected_themes: BTreeSet<String>,

    /// Indices of songs passing the theme filter (cached).
    pub filtered: Vec<usize>,

    /// Requested number of songs to draw.
    pub song_count: usize,

    /// Indices of the most recent random draw.
    pub selection: Option<Vec<usize>>,

    /// Note attached to the most recent draw.
    pub draw_notice: Option<DrawNotice>,

    /// Contents of the "CSV file path" text field.
    pub path_input: String,

    /// Error message shown in the UI.
    pub status_message: Option<String>,

    /// Informational message shown in the UI.
    pub info_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

impl AppState {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            path_input: config.default_csv_path.display().to_string(),
            song_count: config.default_song_count.max(1),
            config,
            table: None,
            source_label: None,
            schema_report: None,
            theme_options: vec![ALL_THEMES.to_string()],
            selected_themes: BTreeSet::from([ALL_THEMES.to_string()]),
            filtered: Vec::new(),
            selection: None,
            draw_notice: None,
            status_message: None,
            info_message: None,
        }
    }

    /// Load the configured default spreadsheet if it exists.
    pub fn load_default(&mut self) {
        let path = self.config.default_csv_path.clone();
        if path.exists() {
            self.load_path(&path);
        } else {
            self.info_message = Some(format!(
                "CSV file {} not found. Open a file or check the path.",
                path.display()
            ));
        }
    }

    /// Load a spreadsheet. On failure the previous table is kept and the
    /// error is shown.
    pub fn load_path(&mut self, path: &Path) -> bool {
        match load_file(path) {
            Ok(table) => {
                self.set_table(table, path.display().to_string());
                true
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Ingest a newly loaded table: validate, index themes, reset filters.
    pub fn set_table(&mut self, table: SongTable, source_label: String) {
        let report = validate(&table);
        report.log();
        if table.is_empty() {
            log::warn!("{source_label} contains no songs");
        }

        self.theme_options = theme_index(&table);
        self.selected_themes = BTreeSet::from([ALL_THEMES.to_string()]);
        self.filtered = table.all_indices();
        self.selection = None;
        self.draw_notice = None;
        self.status_message = None;
        self.info_message = Some(format!("Loaded {} songs from {source_label}", table.len()));

        self.schema_report = Some(report);
        self.source_label = Some(source_label);
        self.table = Some(table);
        self.clamp_count();
    }

    /// Recompute `filtered` after a theme change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            let selected: Vec<&str> = self.selected_themes.iter().map(String::as_str).collect();
            self.filtered = filtered_indices(table, &selected);
        }
        self.clamp_count();
    }

    /// Tick or untick a theme.
    pub fn toggle_theme(&mut self, theme: &str) {
        if !self.selected_themes.remove(theme) {
            self.selected_themes.insert(theme.to_string());
        }
        self.refilter();
    }

    /// Keep `song_count` within `1..=filtered songs`.
    pub fn clamp_count(&mut self) {
        self.song_count = self.song_count.clamp(1, self.filtered.len().max(1));
    }

    /// Draw a fresh random selection from the filtered songs.
    pub fn generate(&mut self) {
        let result = draw(&self.filtered, self.song_count);
        if let Some(notice) = &result.notice {
            log::warn!("{notice}");
        }
        log::info!(
            "Selected {} of {} filtered songs",
            result.picked.len(),
            self.filtered.len()
        );
        self.selection = Some(result.picked);
        self.draw_notice = result.notice;
    }

    /// Songs among the filtered rows that have a second arrangement.
    pub fn songs_with_second_arrangement(&self) -> usize {
        self.table
            .as_ref()
            .map(|t| t.count_present(&self.filtered, "Arrangement 2 Name"))
            .unwrap_or(0)
    }

    /// Write the current selection to `path`.
    pub fn save_export(&self, mode: ExportMode, path: &Path) -> Result<()> {
        let rows = self.selection.as_deref().unwrap_or(&[]);
        match &self.table {
            Some(table) => save_selection(table, rows, mode, path),
            None => save_selection(&SongTable::default(), rows, mode, path),
        }
    }
}
