mod app;
mod card;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::SongSelectorApp;
use config::SelectorConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = SelectorConfig::load();
    log::debug!("Using {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Worship Song Selector",
        options,
        Box::new(|_cc| Ok(Box::new(SongSelectorApp::new(AppState::new(config))))),
    )
}
