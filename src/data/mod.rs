/// Data layer: core types, loading, and the query functions behind the charts.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  success distribution / payload sample per selection
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
