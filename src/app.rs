use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, songs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SongSelectorApp {
    pub state: AppState,
}

impl SongSelectorApp {
    /// Start a session, loading the configured default spreadsheet if present.
    pub fn new(mut state: AppState) -> Self {
        state.load_default();
        Self { state }
    }
}

impl eframe::App for SongSelectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: input and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selection ----
        egui::CentralPanel::default().show(ctx, |ui| {
            songs::songs_panel(ui, &mut self.state);
        });
    }
}
