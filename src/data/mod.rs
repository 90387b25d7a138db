/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + coerce files → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Order>, category/date indexes (immutable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range + category criteria → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  KPIs, group-bys, weekly buckets → chart inputs
///   └──────────┘
/// ```
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
