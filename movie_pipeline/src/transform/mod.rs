//! Bronze → silver: normalize every raw CSV into a typed Parquet table.
//!
//! The per-row normalizers are pure functions in the submodules;
//! [`Transformer`] reads the raw files, applies them, and persists the results.

pub mod credits;
pub mod keywords;
pub mod movies;
pub mod ratings;

use snafu::ResultExt;
use tracing::{info, warn};

use crate::errors::{PersistSnafu, ReadSourceSnafu, TransformError};
use crate::io::{DataRepository, Table};
use crate::models::raw::{RawCredits, RawFrame, RawKeywords, RawMovie, RawRating};
use crate::models::{Credits, Keywords, Movie, Rating};
use crate::report::StageReport;

pub use credits::normalize_credits;
pub use keywords::normalize_keywords;
pub use movies::normalize_movie;
pub use ratings::normalize_rating;

pub const RAW_MOVIES: &str = "movies_metadata";
pub const RAW_CREDITS: &str = "credits";
pub const RAW_KEYWORDS: &str = "keywords";
pub const RAW_RATINGS: &str = "ratings_small";

/// Runs the transformation stage between two layer repositories.
pub struct Transformer {
    bronze: DataRepository,
    silver: DataRepository,
    cast_limit: usize,
}

impl Transformer {
    pub fn new(bronze: DataRepository, silver: DataRepository, cast_limit: usize) -> Self {
        Self {
            bronze,
            silver,
            cast_limit,
        }
    }

    /// Normalizes all raw tables. Tables are processed one after another; the
    /// first failure aborts the stage.
    pub fn execute(&self) -> Result<StageReport, TransformError> {
        let mut report = StageReport::default();

        info!("Transforming {RAW_MOVIES}.csv");
        let movies: Vec<Movie> = self.normalize(RAW_MOVIES, RawMovie::rows, normalize_movie)?;
        self.persist(&movies, &mut report)?;

        info!("Transforming {RAW_CREDITS}.csv");
        let cast_limit = self.cast_limit;
        let credits: Vec<Credits> = self.normalize(RAW_CREDITS, RawCredits::rows, |raw| {
            normalize_credits(raw, cast_limit)
        })?;
        self.persist(&credits, &mut report)?;

        info!("Transforming {RAW_KEYWORDS}.csv");
        let keywords: Vec<Keywords> =
            self.normalize(RAW_KEYWORDS, RawKeywords::rows, normalize_keywords)?;
        self.persist(&keywords, &mut report)?;

        if self.bronze.exists_csv(RAW_RATINGS) {
            info!("Transforming {RAW_RATINGS}.csv");
            let ratings: Vec<Rating> =
                self.normalize(RAW_RATINGS, RawRating::rows, normalize_rating)?;
            self.persist(&ratings, &mut report)?;
        } else {
            warn!("{RAW_RATINGS}.csv not found, skipping");
        }

        info!(%report, "Transformation stage finished");
        Ok(report)
    }

    fn normalize<R, T>(
        &self,
        table: &str,
        rows: impl Fn(&RawFrame<'_>) -> Result<Vec<R>, TransformError>,
        normalize: impl Fn(&R) -> Option<T>,
    ) -> Result<Vec<T>, TransformError> {
        let df = self.bronze.read_csv(table).context(ReadSourceSnafu { table })?;
        let raw = rows(&RawFrame::new(table, &df))?;

        let normalized: Vec<T> = raw.iter().filter_map(&normalize).collect();
        let dropped = raw.len() - normalized.len();
        if dropped > 0 {
            info!(table, dropped, "Dropped rows without required fields");
        }
        Ok(normalized)
    }

    fn persist<T: Table>(&self, rows: &[T], report: &mut StageReport) -> Result<(), TransformError> {
        let shape = self
            .silver
            .save_table(rows)
            .context(PersistSnafu { table: T::NAME })?;
        info!(
            table = T::NAME,
            rows = shape.rows,
            columns = shape.columns,
            "Saved normalized table"
        );
        report.record(T::NAME, shape);
        Ok(())
    }
}
