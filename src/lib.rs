//! Sodium-to-potassium ratio viewer: CSV ingestion, aggregation and
//! histogram rendering, independent of the desktop shell in `main.rs`.

pub mod chart;
pub mod data;
pub mod state;
