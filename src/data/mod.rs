/// Data layer: song table, loading, validation, filtering, sampling, export.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SongTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │ SongTable │ ───▶ │  schema   │  missing / extra columns (advisory)
///   └──────────┘      └──────────┘
///        │  themes: distinct tags for the picker
///        ▼
///   ┌──────────┐
///   │  filter   │  selected themes → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sampler  │  random rows without replacement
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  full / summary CSV
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
pub mod sampler;
pub mod schema;
pub mod themes;
