/// Data layer: core types, loading, normalization and analysis.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawPosting>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  experience / salary ranges, rating → numbers
///   └───────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ JobDataset  │  immutable Vec<Posting>, shared as Arc
///   └────────────┘
///        │
///        ├──────────────┬─────────────┬────────────┐
///        ▼              ▼             ▼            ▼
///   ┌──────────┐  ┌───────────┐  ┌────────┐  ┌─────────┐
///   │ selection │  │ aggregate  │  │ miner   │  │ summary  │
///   └──────────┘  └───────────┘  └────────┘  └─────────┘
///   options and     counts, means,   top skill    shape, describe,
///   Selection       filters          triples      histograms
/// ```

pub mod aggregate;
pub mod loader;
pub mod miner;
pub mod model;
pub mod normalize;
pub mod selection;
pub mod summary;
