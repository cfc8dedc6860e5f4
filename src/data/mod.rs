/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  Driblab export (.csv / .json / .parquet)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore │  physical + events, immutable
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selection → filtered row indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod positions;
pub mod store;
