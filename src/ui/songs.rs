use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::card::{ChordChart, SongCard};
use crate::data::export::ExportMode;
use crate::state::AppState;
use crate::ui::panels::save_export_dialog;

// ---------------------------------------------------------------------------
// Central panel – metrics, preview, random selection, export
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn songs_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a songs file to get started  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics(ui, state);
            ui.add_space(8.0);
            preview(ui, state);
            ui.separator();
            selection_controls(ui, state);
            selection(ui, state);
        });
}

fn metrics(ui: &mut Ui, state: &AppState) {
    let total = state.table.as_ref().map(|t| t.len()).unwrap_or(0);
    let entries = [
        ("Total Songs", total),
        ("Filtered Songs", state.filtered.len()),
        ("Songs with 2 Arrangements", state.songs_with_second_arrangement()),
    ];
    ui.columns(entries.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(entries) {
            col.label(label);
            col.heading(value.to_string());
        }
    });
}

fn preview(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };
    let rows: Vec<usize> = state
        .filtered
        .iter()
        .copied()
        .take(state.config.preview_rows)
        .collect();

    egui::CollapsingHeader::new(RichText::new("Preview Database").strong())
        .id_salt("preview")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .vscroll(false)
                    .columns(Column::auto().at_least(60.0), table.columns.len())
                    .header(20.0, |mut header| {
                        for col in &table.columns {
                            header.col(|ui: &mut Ui| {
                                ui.strong(col.as_str());
                            });
                        }
                    })
                    .body(|mut body| {
                        for song in table.rows(&rows) {
                            body.row(18.0, |mut row| {
                                for col in &table.columns {
                                    row.col(|ui: &mut Ui| {
                                        ui.label(song.text(col).unwrap_or_default());
                                    });
                                }
                            });
                        }
                    });
            });
        });
}

fn selection_controls(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Random Song Selection");

    let available = state.filtered.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("How many songs would you like to select?");
        ui.add_enabled(
            available > 0,
            egui::DragValue::new(&mut state.song_count).range(1..=available.max(1)),
        );
        if ui
            .add_enabled(available > 0, egui::Button::new("Generate Song List"))
            .clicked()
        {
            state.generate();
        }
    });

    if available == 0 {
        ui.label("No songs match the selected themes.");
    }
}

fn selection(ui: &mut Ui, state: &mut AppState) {
    let Some(rows) = &state.selection else {
        return;
    };
    let Some(table) = &state.table else {
        return;
    };

    let cards: Vec<SongCard> = table
        .rows(rows)
        .enumerate()
        .map(|(i, song)| SongCard::build(song, i + 1, &state.config.missing_value))
        .collect();

    let plural = if cards.len() == 1 { "" } else { "s" };
    ui.heading(format!("Your Random Song Selection ({} song{plural})", cards.len()));

    if let Some(notice) = &state.draw_notice {
        ui.label(RichText::new(notice.to_string()).color(Color32::YELLOW));
    }

    for card in &cards {
        song_card(ui, card);
    }

    ui.heading("Export Options");
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Save Full Details (CSV)…").clicked() {
            save_export_dialog(state, ExportMode::Full);
        }
        if ui.button("Save Summary (CSV)…").clicked() {
            save_export_dialog(state, ExportMode::Summary);
        }
    });
}

fn song_card(ui: &mut Ui, card: &SongCard) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(card.heading.as_str());

        egui::Grid::new(("card_fields", card.heading.as_str()))
            .num_columns(2)
            .show(ui, |ui: &mut Ui| {
                for (label, value) in &card.fields {
                    ui.strong(*label);
                    ui.label(value.as_str());
                    ui.end_row();
                }
            });

        if let Some(themes) = &card.themes {
            ui.label(format!("Themes: {themes}"));
        }
        if let Some(notes) = &card.notes {
            ui.label(format!("Notes: {notes}"));
        }

        ui.columns(2, |cols: &mut [Ui]| {
            for (col, arr) in cols.iter_mut().zip(&card.arrangements) {
                col.strong(arr.heading.as_str());
                for (label, value) in &arr.fields {
                    col.label(format!("• {label}: {value}"));
                }
                match &arr.chord_chart {
                    Some(ChordChart::Content(chart)) => {
                        col.label("• Chord Chart:");
                        col.monospace(chart.as_str());
                    }
                    Some(ChordChart::Flag(flag)) => {
                        col.label(format!("• Has Chord Chart: {flag}"));
                    }
                    None => {}
                }
                if let Some(tags) = &arr.tags {
                    col.label(format!("• Tags: {tags}"));
                }
                if let Some(notes) = &arr.notes {
                    col.label(format!("• Notes: {notes}"));
                }
            }
        });
    });
    ui.add_space(6.0);
}
