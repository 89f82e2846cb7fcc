//! Error taxonomy of the pipeline.
//!
//! Each stage has its own snafu error enum carrying backtraces and context;
//! [`PipelineError`] unifies them for the orchestration layer.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use snafu::{Backtrace, Snafu};
use thiserror::Error;

use crate::config::ConfigError;

/// Storage and aggregation failures (the "loading" error kind).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LoadError {
    /// The requested table file does not exist.
    #[snafu(display("Table not found: {}", path.display()))]
    TableNotFound { path: PathBuf, backtrace: Backtrace },

    /// The table file exists but could not be opened.
    #[snafu(display("Failed to open {}: {source}", path.display()))]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The layer directory could not be created.
    #[snafu(display("Failed to create directory {}: {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The layer directory could not be listed.
    #[snafu(display("Failed to list {}: {source}", path.display()))]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The file is not a readable table (corrupt or wrong format).
    #[snafu(display("Failed to read table {}: {source}", path.display()))]
    ReadTable {
        path: PathBuf,
        source: PolarsError,
        backtrace: Backtrace,
    },

    /// Writing the table file failed.
    #[snafu(display("Failed to write table {}: {source}", path.display()))]
    WriteTable {
        path: PathBuf,
        source: PolarsError,
        backtrace: Backtrace,
    },

    /// A staged table file could not be moved into place.
    #[snafu(display("Failed to move {} to {}: {source}", from.display(), to.display()))]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A persisted table does not have the columns its record type expects.
    #[snafu(display("Table `{table}` does not match its record layout: {source}"))]
    Decode {
        table: String,
        source: PolarsError,
        backtrace: Backtrace,
    },

    /// Records could not be turned into a frame.
    #[snafu(display("Failed to build frame for table `{table}`: {source}"))]
    Encode {
        table: String,
        source: PolarsError,
        backtrace: Backtrace,
    },
}

/// Systemic failures of the bronze → silver stage.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TransformError {
    /// The raw file could not be read.
    #[snafu(display("Failed to read raw table `{table}`: {source}"))]
    ReadSource {
        table: String,
        #[snafu(backtrace)]
        source: LoadError,
    },

    /// The raw file lacks a column the normalizer depends on.
    #[snafu(display("Raw table `{table}` is missing required column `{column}`"))]
    MissingColumn {
        table: String,
        column: String,
        backtrace: Backtrace,
    },

    /// A raw column could not be read as text.
    #[snafu(display("Raw table `{table}` could not be decoded: {source}"))]
    DecodeSource {
        table: String,
        source: PolarsError,
        backtrace: Backtrace,
    },

    /// The normalized table could not be written to the silver layer.
    #[snafu(display("Failed to persist normalized table `{table}`: {source}"))]
    Persist {
        table: String,
        #[snafu(backtrace)]
        source: LoadError,
    },
}

/// Failures while making the raw files available in the bronze layer.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum IngestionError {
    #[snafu(display("Required raw file is missing: {}", path.display()))]
    MissingRawFile { path: PathBuf, backtrace: Backtrace },

    #[snafu(display("Failed to list raw directory {}: {source}", path.display()))]
    ListRaw {
        path: PathBuf,
        #[snafu(backtrace)]
        source: LoadError,
    },

    #[snafu(display("Failed to list source directory {}: {source}", path.display()))]
    ListSource {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to copy {} to {}: {source}", from.display(), to.display()))]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to prepare raw directory {}: {source}", path.display()))]
    PrepareDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// The unified error type for the `movie_pipeline` crate.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Raw files could not be fetched or are incomplete.
    #[error("Ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    /// The normalization stage failed as a whole.
    #[error("Transformation error: {0}")]
    Transformation(#[from] TransformError),

    /// Aggregation, or reading/writing a table, failed.
    #[error("Loading error: {0}")]
    Loading(#[from] LoadError),

    /// A domain value is outside its allowed range. Records currently clamp
    /// instead of raising this.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
