use polars::prelude::*;

use crate::io::frame::{self, column, required};
use crate::io::table::Table;

pub const MIN_RATING: f64 = 0.5;
pub const MAX_RATING: f64 = 5.0;

/// A single user rating (silver `ratings`).
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub user_id: i64,
    pub movie_id: i64,
    pub rating: f64,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl Rating {
    /// Builds a rating, clamping the score into the allowed range.
    pub fn new(user_id: i64, movie_id: i64, rating: f64, timestamp: i64) -> Self {
        Self {
            user_id,
            movie_id,
            rating: rating.clamp(MIN_RATING, MAX_RATING),
            timestamp,
        }
    }
}

impl Table for Rating {
    const NAME: &'static str = "ratings";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("user_id", rows.iter().map(|r| r.user_id).collect::<Vec<_>>()),
            column("movie_id", rows.iter().map(|r| r.movie_id).collect::<Vec<_>>()),
            column("rating", rows.iter().map(|r| r.rating).collect::<Vec<_>>()),
            column("timestamp", rows.iter().map(|r| r.timestamp).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let user_id = required(frame::read_i64(df, "user_id")?, "user_id")?;
        let movie_id = required(frame::read_i64(df, "movie_id")?, "movie_id")?;
        let rating = required(frame::read_f64(df, "rating")?, "rating")?;
        let timestamp = required(frame::read_i64(df, "timestamp")?, "timestamp")?;
        Ok(user_id
            .into_iter()
            .zip(movie_id)
            .zip(rating)
            .zip(timestamp)
            .map(|(((user_id, movie_id), rating), timestamp)| Rating {
                user_id,
                movie_id,
                rating,
                timestamp,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_clamped() {
        assert_eq!(Rating::new(1, 2, 10.0, 0).rating, 5.0);
        assert_eq!(Rating::new(1, 2, 0.0, 0).rating, 0.5);
        assert_eq!(Rating::new(1, 2, 3.5, 0).rating, 3.5);
    }
}
