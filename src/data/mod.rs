/// Data layer: core types, generation, filtering, reports and export.
///
/// Architecture:
/// ```text
///   seed, count, fee rate
///        │
///        ▼
///   ┌──────────────┐
///   │ store        │  seeded generation → Vec<ClaimRecord> (cached)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ filter       │  FilterSpec predicates → filtered records
///   └──────────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────────┐   ┌──────────────┐
///   │ report       │   │ export       │  .xlsx / .csv / .json / .parquet
///   └──────────────┘   └──────────────┘
/// ```

pub mod export;
pub mod filter;
pub mod model;
pub mod report;
pub mod store;
