use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "song-selector.json";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "SONG_SELECTOR_CONFIG";

/// Application settings. Every field has a default, so the file is optional
/// and may set any subset of keys.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    /// Spreadsheet loaded at start-up when it exists.
    pub default_csv_path: PathBuf,
    /// Initial value of the "how many songs" input.
    pub default_song_count: usize,
    /// Shown on song cards in place of blank cells.
    pub missing_value: String,
    /// Prefix of exported file names.
    pub export_prefix: String,
    /// Rows shown in the table preview.
    pub preview_rows: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            default_csv_path: PathBuf::from("worship_songs.csv"),
            default_song_count: 3,
            missing_value: "N/A".to_string(),
            export_prefix: "selected_songs".to_string(),
            preview_rows: 10,
        }
    }
}

impl SelectorConfig {
    /// Load from `$SONG_SELECTOR_CONFIG` or `./song-selector.json`.
    /// Returns defaults if the file doesn't exist, and logs a warning if it
    /// exists but can't be read or parsed.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e:#}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SelectorConfig = serde_json::from_str(text)?;
        Ok(config)
    }
}
