//! Gold-layer analytics rows.

use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use serde::Serialize;

use crate::io::frame::{self, column, list_column, required};
use crate::io::table::Table;

/// Statistics for one release year (gold `yearly_analytics`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyStats {
    pub release_year: i32,
    pub movie_count: i64,
    pub avg_budget: f64,
    pub total_budget: f64,
    pub avg_revenue: f64,
    pub total_revenue: f64,
    pub avg_profit: f64,
    pub total_profit: f64,
    pub avg_rating: f64,
    pub avg_popularity: f64,
    /// Mean over movies with a known runtime.
    pub avg_runtime: Option<f64>,
}

impl Table for YearlyStats {
    const NAME: &'static str = "yearly_analytics";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("release_year", rows.iter().map(|r| r.release_year).collect::<Vec<_>>()),
            column("movie_count", rows.iter().map(|r| r.movie_count).collect::<Vec<_>>()),
            column("avg_budget", rows.iter().map(|r| r.avg_budget).collect::<Vec<_>>()),
            column("total_budget", rows.iter().map(|r| r.total_budget).collect::<Vec<_>>()),
            column("avg_revenue", rows.iter().map(|r| r.avg_revenue).collect::<Vec<_>>()),
            column("total_revenue", rows.iter().map(|r| r.total_revenue).collect::<Vec<_>>()),
            column("avg_profit", rows.iter().map(|r| r.avg_profit).collect::<Vec<_>>()),
            column("total_profit", rows.iter().map(|r| r.total_profit).collect::<Vec<_>>()),
            column("avg_rating", rows.iter().map(|r| r.avg_rating).collect::<Vec<_>>()),
            column("avg_popularity", rows.iter().map(|r| r.avg_popularity).collect::<Vec<_>>()),
            column("avg_runtime", rows.iter().map(|r| r.avg_runtime).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let release_year = required(frame::read_i32(df, "release_year")?, "release_year")?;
        let movie_count = required(frame::read_i64(df, "movie_count")?, "movie_count")?;
        let avg_budget = required(frame::read_f64(df, "avg_budget")?, "avg_budget")?;
        let total_budget = required(frame::read_f64(df, "total_budget")?, "total_budget")?;
        let avg_revenue = required(frame::read_f64(df, "avg_revenue")?, "avg_revenue")?;
        let total_revenue = required(frame::read_f64(df, "total_revenue")?, "total_revenue")?;
        let avg_profit = required(frame::read_f64(df, "avg_profit")?, "avg_profit")?;
        let total_profit = required(frame::read_f64(df, "total_profit")?, "total_profit")?;
        let avg_rating = required(frame::read_f64(df, "avg_rating")?, "avg_rating")?;
        let avg_popularity = required(frame::read_f64(df, "avg_popularity")?, "avg_popularity")?;
        let avg_runtime = frame::read_f64(df, "avg_runtime")?;

        Ok((0..df.height())
            .map(|i| YearlyStats {
                release_year: release_year[i],
                movie_count: movie_count[i],
                avg_budget: avg_budget[i],
                total_budget: total_budget[i],
                avg_revenue: avg_revenue[i],
                total_revenue: total_revenue[i],
                avg_profit: avg_profit[i],
                total_profit: total_profit[i],
                avg_rating: avg_rating[i],
                avg_popularity: avg_popularity[i],
                avg_runtime: avg_runtime[i],
            })
            .collect())
    }
}

/// Statistics for one genre (gold `genre_analytics`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreStats {
    pub genre: String,
    pub movie_count: i64,
    pub avg_budget: f64,
    pub total_revenue: f64,
    pub avg_revenue: f64,
    pub avg_profit: f64,
    pub avg_rating: f64,
    pub avg_popularity: f64,
    pub avg_runtime: Option<f64>,
}

impl Table for GenreStats {
    const NAME: &'static str = "genre_analytics";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("genre", rows.iter().map(|r| r.genre.as_str()).collect::<Vec<_>>()),
            column("movie_count", rows.iter().map(|r| r.movie_count).collect::<Vec<_>>()),
            column("avg_budget", rows.iter().map(|r| r.avg_budget).collect::<Vec<_>>()),
            column("total_revenue", rows.iter().map(|r| r.total_revenue).collect::<Vec<_>>()),
            column("avg_revenue", rows.iter().map(|r| r.avg_revenue).collect::<Vec<_>>()),
            column("avg_profit", rows.iter().map(|r| r.avg_profit).collect::<Vec<_>>()),
            column("avg_rating", rows.iter().map(|r| r.avg_rating).collect::<Vec<_>>()),
            column("avg_popularity", rows.iter().map(|r| r.avg_popularity).collect::<Vec<_>>()),
            column("avg_runtime", rows.iter().map(|r| r.avg_runtime).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let genre = required(frame::read_str(df, "genre")?, "genre")?;
        let movie_count = required(frame::read_i64(df, "movie_count")?, "movie_count")?;
        let avg_budget = required(frame::read_f64(df, "avg_budget")?, "avg_budget")?;
        let total_revenue = required(frame::read_f64(df, "total_revenue")?, "total_revenue")?;
        let avg_revenue = required(frame::read_f64(df, "avg_revenue")?, "avg_revenue")?;
        let avg_profit = required(frame::read_f64(df, "avg_profit")?, "avg_profit")?;
        let avg_rating = required(frame::read_f64(df, "avg_rating")?, "avg_rating")?;
        let avg_popularity = required(frame::read_f64(df, "avg_popularity")?, "avg_popularity")?;
        let avg_runtime = frame::read_f64(df, "avg_runtime")?;

        Ok(genre
            .into_iter()
            .enumerate()
            .map(|(i, genre)| GenreStats {
                genre,
                movie_count: movie_count[i],
                avg_budget: avg_budget[i],
                total_revenue: total_revenue[i],
                avg_revenue: avg_revenue[i],
                avg_profit: avg_profit[i],
                avg_rating: avg_rating[i],
                avg_popularity: avg_popularity[i],
                avg_runtime: avg_runtime[i],
            })
            .collect())
    }
}

/// Statistics for one director (gold `director_analytics`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorStats {
    pub director: String,
    pub movie_count: i64,
    pub avg_budget: f64,
    pub total_revenue: f64,
    pub avg_revenue: f64,
    pub total_profit: f64,
    pub avg_profit: f64,
    pub avg_rating: f64,
    pub avg_popularity: f64,
}

impl Table for DirectorStats {
    const NAME: &'static str = "director_analytics";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("director", rows.iter().map(|r| r.director.as_str()).collect::<Vec<_>>()),
            column("movie_count", rows.iter().map(|r| r.movie_count).collect::<Vec<_>>()),
            column("avg_budget", rows.iter().map(|r| r.avg_budget).collect::<Vec<_>>()),
            column("total_revenue", rows.iter().map(|r| r.total_revenue).collect::<Vec<_>>()),
            column("avg_revenue", rows.iter().map(|r| r.avg_revenue).collect::<Vec<_>>()),
            column("total_profit", rows.iter().map(|r| r.total_profit).collect::<Vec<_>>()),
            column("avg_profit", rows.iter().map(|r| r.avg_profit).collect::<Vec<_>>()),
            column("avg_rating", rows.iter().map(|r| r.avg_rating).collect::<Vec<_>>()),
            column("avg_popularity", rows.iter().map(|r| r.avg_popularity).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let director = required(frame::read_str(df, "director")?, "director")?;
        let movie_count = required(frame::read_i64(df, "movie_count")?, "movie_count")?;
        let avg_budget = required(frame::read_f64(df, "avg_budget")?, "avg_budget")?;
        let total_revenue = required(frame::read_f64(df, "total_revenue")?, "total_revenue")?;
        let avg_revenue = required(frame::read_f64(df, "avg_revenue")?, "avg_revenue")?;
        let total_profit = required(frame::read_f64(df, "total_profit")?, "total_profit")?;
        let avg_profit = required(frame::read_f64(df, "avg_profit")?, "avg_profit")?;
        let avg_rating = required(frame::read_f64(df, "avg_rating")?, "avg_rating")?;
        let avg_popularity = required(frame::read_f64(df, "avg_popularity")?, "avg_popularity")?;

        Ok(director
            .into_iter()
            .enumerate()
            .map(|(i, director)| DirectorStats {
                director,
                movie_count: movie_count[i],
                avg_budget: avg_budget[i],
                total_revenue: total_revenue[i],
                avg_revenue: avg_revenue[i],
                total_profit: total_profit[i],
                avg_profit: avg_profit[i],
                avg_rating: avg_rating[i],
                avg_popularity: avg_popularity[i],
            })
            .collect())
    }
}

/// The ordering a top-N slice is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankCriterion {
    Revenue,
    Profit,
    /// Vote average, among movies with enough votes.
    Rating,
}

impl RankCriterion {
    /// Slice order inside `top_movies`.
    pub const ALL: [RankCriterion; 3] = [Self::Revenue, Self::Profit, Self::Rating];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Profit => "profit",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for RankCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(Self::Revenue),
            "profit" => Ok(Self::Profit),
            "rating" => Ok(Self::Rating),
            other => Err(format!("unknown rank type `{other}`")),
        }
    }
}

/// One ranked entry of gold `top_movies`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovie {
    pub id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    pub revenue: f64,
    pub budget: f64,
    pub profit: f64,
    pub roi: Option<f64>,
    pub vote_average: f64,
    pub vote_count: i64,
    pub genre_names: Vec<String>,
    pub director: Option<String>,
    pub rank_type: RankCriterion,
    /// 1-based position within its slice.
    pub rank: i64,
}

impl Table for TopMovie {
    const NAME: &'static str = "top_movies";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("id", rows.iter().map(|r| r.id).collect::<Vec<_>>()),
            column("title", rows.iter().map(|r| r.title.as_str()).collect::<Vec<_>>()),
            column("release_year", rows.iter().map(|r| r.release_year).collect::<Vec<_>>()),
            column("revenue", rows.iter().map(|r| r.revenue).collect::<Vec<_>>()),
            column("budget", rows.iter().map(|r| r.budget).collect::<Vec<_>>()),
            column("profit", rows.iter().map(|r| r.profit).collect::<Vec<_>>()),
            column("roi", rows.iter().map(|r| r.roi).collect::<Vec<_>>()),
            column("vote_average", rows.iter().map(|r| r.vote_average).collect::<Vec<_>>()),
            column("vote_count", rows.iter().map(|r| r.vote_count).collect::<Vec<_>>()),
            list_column("genre_names", rows.iter().map(|r| Some(r.genre_names.as_slice()))),
            column("director", rows.iter().map(|r| r.director.as_deref()).collect::<Vec<_>>()),
            column("rank_type", rows.iter().map(|r| r.rank_type.as_str()).collect::<Vec<_>>()),
            column("rank", rows.iter().map(|r| r.rank).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let id = required(frame::read_i64(df, "id")?, "id")?;
        let title = required(frame::read_str(df, "title")?, "title")?;
        let release_year = frame::read_i32(df, "release_year")?;
        let revenue = required(frame::read_f64(df, "revenue")?, "revenue")?;
        let budget = required(frame::read_f64(df, "budget")?, "budget")?;
        let profit = required(frame::read_f64(df, "profit")?, "profit")?;
        let roi = frame::read_f64(df, "roi")?;
        let vote_average = required(frame::read_f64(df, "vote_average")?, "vote_average")?;
        let vote_count = required(frame::read_i64(df, "vote_count")?, "vote_count")?;
        let genre_names = frame::read_str_list(df, "genre_names")?;
        let director = frame::read_str(df, "director")?;
        let rank_type = required(frame::read_str(df, "rank_type")?, "rank_type")?
            .iter()
            .map(|s| s.parse().map_err(|e: String| PolarsError::ComputeError(e.into())))
            .collect::<PolarsResult<Vec<RankCriterion>>>()?;
        let rank = required(frame::read_i64(df, "rank")?, "rank")?;

        Ok((0..df.height())
            .map(|i| TopMovie {
                id: id[i],
                title: title[i].clone(),
                release_year: release_year[i],
                revenue: revenue[i],
                budget: budget[i],
                profit: profit[i],
                roi: roi[i],
                vote_average: vote_average[i],
                vote_count: vote_count[i],
                genre_names: genre_names[i].clone().unwrap_or_default(),
                director: director[i].clone(),
                rank_type: rank_type[i],
                rank: rank[i],
            })
            .collect())
    }
}
