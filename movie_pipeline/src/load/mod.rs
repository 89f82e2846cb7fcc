//! Silver → gold: join the normalized tables and build the analytics tables.

pub mod director;
pub mod genre;
pub mod join;
pub mod stats;
pub mod top;
pub mod yearly;

use polars::prelude::DataFrame;
use snafu::ResultExt;
use tracing::info;

use crate::errors::{EncodeSnafu, LoadError};
use crate::io::{DataRepository, Table};
use crate::models::{
    Credits, DirectorStats, EnrichedMovie, GenreStats, Keywords, Movie, TopMovie, YearlyStats,
};
use crate::report::{StageReport, TableShape};

pub use director::director_stats;
pub use genre::{genre_pairs, genre_stats};
pub use join::enrich;
pub use top::top_movies;
pub use yearly::yearly_stats;

/// Thresholds of the analytics tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsOptions {
    /// Rows per top-N slice.
    pub top_n: usize,
    /// Vote count a movie needs to enter the rating ranking.
    pub min_rating_votes: i64,
    pub min_director_movies: i64,
    pub min_year: i32,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            top_n: 100,
            min_rating_votes: 100,
            min_director_movies: 3,
            min_year: 1900,
        }
    }
}

/// Every gold table, computed but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldTables {
    pub enriched: Vec<EnrichedMovie>,
    pub yearly: Vec<YearlyStats>,
    pub genres: Vec<GenreStats>,
    pub top: Vec<TopMovie>,
    pub directors: Vec<DirectorStats>,
}

impl GoldTables {
    /// Builds all analytics from the normalized tables.
    pub fn build(
        movies: Vec<Movie>,
        credits: &[Credits],
        keywords: &[Keywords],
        options: &AnalyticsOptions,
    ) -> Self {
        let enriched = enrich(movies, credits, keywords);

        info!("Generating yearly analytics");
        let yearly = yearly_stats(&enriched, options.min_year);

        info!("Generating genre analytics");
        let genres = genre_stats(&enriched);

        info!("Generating top movies");
        let top = top_movies(&enriched, options.top_n, options.min_rating_votes);

        info!("Generating director analytics");
        let directors = director_stats(&enriched, options.min_director_movies);

        Self {
            enriched,
            yearly,
            genres,
            top,
            directors,
        }
    }
}

fn encode<T: Table>(rows: &[T]) -> Result<(&'static str, DataFrame), LoadError> {
    let df = T::to_frame(rows).context(EncodeSnafu { table: T::NAME })?;
    Ok((T::NAME, df))
}

/// Runs the loading stage between the silver and gold repositories.
pub struct AnalyticsLoader {
    silver: DataRepository,
    gold: DataRepository,
    options: AnalyticsOptions,
}

impl AnalyticsLoader {
    pub fn new(silver: DataRepository, gold: DataRepository, options: AnalyticsOptions) -> Self {
        Self {
            silver,
            gold,
            options,
        }
    }

    /// Reads silver, computes and encodes every gold table in memory, then
    /// writes them as one set: either every gold table is replaced or none is.
    pub fn execute(&self) -> Result<StageReport, LoadError> {
        info!("Loading normalized tables");
        let movies: Vec<Movie> = self.silver.read_table()?;
        let credits: Vec<Credits> = self.silver.read_table()?;
        let keywords: Vec<Keywords> = self.silver.read_table()?;
        info!(
            movies = movies.len(),
            credits = credits.len(),
            keywords = keywords.len(),
            "Loaded normalized tables"
        );

        let tables = GoldTables::build(movies, &credits, &keywords, &self.options);
        let mut frames = [
            encode(&tables.enriched)?,
            encode(&tables.yearly)?,
            encode(&tables.genres)?,
            encode(&tables.top)?,
            encode(&tables.directors)?,
        ];
        self.gold.save_parquet_set(&mut frames)?;

        let mut report = StageReport::default();
        for (name, df) in &frames {
            let shape = TableShape::of(df);
            info!(
                table = *name,
                rows = shape.rows,
                columns = shape.columns,
                "Saved analytics table"
            );
            report.record(*name, shape);
        }

        info!(%report, "Loading stage finished");
        Ok(report)
    }
}
