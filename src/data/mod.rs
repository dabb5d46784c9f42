/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → TitleTable (drops rows without a type)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ TitleTable │  Vec<TitleRecord>, immutable base table
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  year / country / genre predicates → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  value counts, genre tokens, per-year series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
