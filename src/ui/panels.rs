use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::{export_file_name, ExportMode};
use crate::data::sample::{write_sample_csv, SAMPLE_FILE_NAME};
use crate::data::schema::EXPECTED_COLUMNS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – database input, theme filter, instructions
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            database_input(ui, state);
            ui.separator();
            theme_filter(ui, state);
            ui.separator();
            instructions(ui);
        });
}

fn database_input(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Database Input");

    if ui.button("Open songs file…").clicked() {
        open_file_dialog(state);
    }

    ui.label("Or enter CSV file path:");
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.text_edit_singleline(&mut state.path_input);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Load").clicked() || submitted {
            let path = PathBuf::from(state.path_input.trim());
            state.load_path(&path);
        }
    });

    if let Some(report) = &state.schema_report {
        if report.is_complete() {
            ui.label("All expected columns present.");
        } else {
            ui.label(
                RichText::new(format!("Missing expected columns: {}", report.missing.join(", ")))
                    .color(Color32::YELLOW),
            );
        }
        if !report.extra.is_empty() {
            ui.label(format!("Extra columns found: {}", report.extra.join(", ")));
        }
    }
}

fn theme_filter(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");

    let Some(table) = &state.table else {
        ui.label("No songs loaded.");
        return;
    };
    let total = table.len();

    // Clone so we can mutate state inside the loop.
    let options = state.theme_options.clone();
    let n_selected = state.selected_themes.len();

    egui::CollapsingHeader::new(RichText::new(format!("Themes  ({n_selected} selected)")).strong())
        .id_salt("themes")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for theme in &options {
                let mut checked = state.selected_themes.contains(theme);
                if ui.checkbox(&mut checked, theme.as_str()).changed() {
                    state.toggle_theme(theme);
                }
            }
        });

    if state.filtered.len() != total {
        ui.label(format!("Filtered to {} songs", state.filtered.len()));
    }
}

fn instructions(ui: &mut Ui) {
    egui::CollapsingHeader::new(RichText::new("Instructions").strong())
        .id_salt("instructions")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("1. Open your worship songs CSV file");
            ui.label("2. Use the theme filter to narrow the list");
            ui.label("3. Choose how many songs to select");
            ui.label("4. Click \"Generate Song List\"");
            ui.label("5. Save the results for service planning");
            ui.add_space(4.0);
            ui.strong("Expected columns");
            ui.label(EXPECTED_COLUMNS.join(", "));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save sample CSV…").clicked() {
                save_sample_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(source)) = (&state.table, &state.source_label) {
            ui.label(format!(
                "{} songs loaded from {source}, {} match the filter",
                table.len(),
                state.filtered.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg.as_str()).color(Color32::RED));
        } else if let Some(msg) = &state.info_message {
            ui.label(msg.as_str());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open songs database")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        if state.load_path(&path) {
            state.path_input = path.display().to_string();
        }
    }
}

/// Ask where to save the current selection and write it.
pub fn save_export_dialog(state: &mut AppState, mode: ExportMode) {
    let name = export_file_name(&state.config.export_prefix, mode, &chrono::Local::now());
    let file = rfd::FileDialog::new()
        .set_title("Save selected songs")
        .set_file_name(&name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.save_export(mode, &path) {
            Ok(()) => {
                state.status_message = None;
                state.info_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn save_sample_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save sample CSV")
        .set_file_name(SAMPLE_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    let result = std::fs::File::create(&path)
        .map_err(|source| crate::error::Error::Io {
            path: path.clone(),
            source,
        })
        .and_then(|f| write_sample_csv(std::io::BufWriter::new(f)));

    match result {
        Ok(()) => {
            log::info!("Wrote sample spreadsheet to {}", path.display());
            state.info_message = Some(format!("Saved sample to {}", path.display()));
        }
        Err(e) => {
            log::error!("Saving sample failed: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
