/// Data layer: core types, loading, and label-driven selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → FrequencyTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ FrequencyTable  │  rows, distinct titles / categories
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  title-case + validate label → selected rows
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
