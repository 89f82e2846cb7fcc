//! Read-only view of the gold layer, as consumed by presentation.

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::LoadError;
use crate::io::{DataRepository, Table};
use crate::models::{DirectorStats, EnrichedMovie, GenreStats, TopMovie, YearlyStats};

const TOP_GENRES: usize = 5;

/// Whatever gold tables exist on disk. Missing tables are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoldSnapshot {
    pub movies: Option<Vec<EnrichedMovie>>,
    pub yearly: Option<Vec<YearlyStats>>,
    pub genres: Option<Vec<GenreStats>>,
    pub top: Option<Vec<TopMovie>>,
    pub directors: Option<Vec<DirectorStats>>,
}

fn load_optional<T: Table>(repo: &DataRepository) -> Result<Option<Vec<T>>, LoadError> {
    if !repo.exists(T::NAME) {
        warn!(table = T::NAME, "Analytics table not found");
        return Ok(None);
    }
    let rows = repo.read_table::<T>()?;
    debug!(table = T::NAME, rows = rows.len(), "Loaded analytics table");
    Ok(Some(rows))
}

impl GoldSnapshot {
    /// Reads every gold table that exists. A table that exists but cannot be
    /// read is an error.
    pub fn load(repo: &DataRepository) -> Result<Self, LoadError> {
        Ok(Self {
            movies: load_optional(repo)?,
            yearly: load_optional(repo)?,
            genres: load_optional(repo)?,
            top: load_optional(repo)?,
            directors: load_optional(repo)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_none()
            && self.yearly.is_none()
            && self.genres.is_none()
            && self.top.is_none()
            && self.directors.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeRevenue {
    /// First year of the decade, e.g. 1990.
    pub decade: i32,
    /// Mean of the yearly average revenue per movie.
    pub avg_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub movie_count: i64,
}

/// Headline numbers of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_movies: usize,
    /// Movies with both a budget and a revenue.
    pub movies_with_financials: usize,
    pub avg_revenue: Option<f64>,
    pub total_revenue: f64,
    /// Mean vote average over movies that have been rated.
    pub avg_rating: Option<f64>,
    pub year_range: Option<YearRange>,
    pub director_count: usize,
    pub genre_count: usize,
    pub top_genres: Vec<GenreCount>,
    pub decade_revenue: Vec<DecadeRevenue>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

impl DatasetOverview {
    pub fn from_snapshot(snapshot: &GoldSnapshot) -> Self {
        let movies = snapshot.movies.as_deref().unwrap_or_default();
        let yearly = snapshot.yearly.as_deref().unwrap_or_default();
        let genres = snapshot.genres.as_deref().unwrap_or_default();

        let financed: Vec<f64> = movies
            .iter()
            .filter(|row| row.movie.has_budget && row.movie.has_revenue)
            .map(|row| row.movie.revenue)
            .collect();

        let years = movies.iter().filter_map(|row| row.movie.release_year);
        let year_range = years.fold(None, |range: Option<YearRange>, year| {
            Some(match range {
                None => YearRange {
                    first: year,
                    last: year,
                },
                Some(r) => YearRange {
                    first: r.first.min(year),
                    last: r.last.max(year),
                },
            })
        });

        let decade_revenue = [(1990, Some(2000)), (2000, Some(2010)), (2010, None)]
            .into_iter()
            .filter_map(|(start, end)| {
                let avg_revenue = mean(
                    yearly
                        .iter()
                        .filter(|y| y.release_year >= start && end.is_none_or(|e| y.release_year < e))
                        .map(|y| y.avg_revenue),
                )?;
                Some(DecadeRevenue {
                    decade: start,
                    avg_revenue,
                })
            })
            .collect();

        Self {
            total_movies: movies.len(),
            movies_with_financials: financed.len(),
            avg_revenue: mean(financed.iter().copied()),
            total_revenue: financed.iter().sum(),
            avg_rating: mean(
                movies
                    .iter()
                    .map(|row| row.movie.vote_average)
                    .filter(|v| *v > 0.0),
            ),
            year_range,
            director_count: snapshot.directors.as_ref().map_or(0, Vec::len),
            genre_count: genres.len(),
            top_genres: genres
                .iter()
                .take(TOP_GENRES)
                .map(|g| GenreCount {
                    genre: g.genre.clone(),
                    movie_count: g.movie_count,
                })
                .collect(),
            decade_revenue,
        }
    }
}
