//! Movie catalog pipeline.
//!
//! Raw catalog CSV files (bronze) are normalized into typed Parquet tables
//! (silver), which are then joined and aggregated into analytics tables
//! (gold). Each stage reads only what the previous stage persisted.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ingestion;
pub mod io;
pub mod load;
pub mod logging;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod transform;

pub use config::Settings;
pub use errors::PipelineError;
pub use pipeline::{Pipeline, Stage};
