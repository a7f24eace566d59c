/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   drug200.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  key → value index, ordered value series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  mean, equal-width histogram
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod stats;

pub use error::DataError;
pub use loader::{load_file, load_reader};
pub use model::{Dataset, HistogramResult, Record, SummaryResult};
pub use stats::{histogram, summarize, DEFAULT_BUCKET_COUNT};
