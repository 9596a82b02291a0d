//! Error types for loading and exporting song tables.

use std::path::PathBuf;

use thiserror::Error;

/// Crate result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading or exporting.
///
/// None of these are fatal: the shell reports them and the previously
/// loaded table stays in place.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file does not exist or cannot be opened.
    #[error("cannot open {path:?}: {source}")]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source was opened but is not a valid table.
    #[error("cannot parse {source_name}: {message}")]
    Parse {
        /// File name or stream label.
        source_name: String,
        message: String,
    },

    /// The file extension is neither `.csv` nor `.json`.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// Summary export needs columns the source table does not have.
    #[error("missing columns for summary export: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Writing an export to disk failed.
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn parse(source_name: &str, message: impl Into<String>) -> Self {
        Error::Parse {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}
