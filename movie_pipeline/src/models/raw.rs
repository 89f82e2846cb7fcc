//! Raw (bronze) rows as read from the catalog CSV files.
//!
//! Every field is kept as text; blank cells are `None`. Coercion happens in
//! the normalizers.

use polars::prelude::*;
use snafu::{OptionExt, ResultExt};

use crate::errors::{DecodeSourceSnafu, MissingColumnSnafu, TransformError};
use crate::io::frame;

/// Column access over a raw text frame.
pub struct RawFrame<'a> {
    table: &'a str,
    df: &'a DataFrame,
}

impl<'a> RawFrame<'a> {
    pub fn new(table: &'a str, df: &'a DataFrame) -> Self {
        Self { table, df }
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    fn has_column(&self, column: &str) -> bool {
        self.df.get_column_index(column).is_some()
    }

    fn cells(&self, column: &str) -> Result<Vec<Option<String>>, TransformError> {
        let values = frame::read_str(self.df, column).context(DecodeSourceSnafu {
            table: self.table,
        })?;
        Ok(values
            .into_iter()
            .map(|cell| cell.filter(|text| !text.trim().is_empty()))
            .collect())
    }

    /// A column the table cannot be processed without.
    pub fn required(&self, column: &str) -> Result<Vec<Option<String>>, TransformError> {
        self.has_column(column)
            .then_some(())
            .context(MissingColumnSnafu {
                table: self.table,
                column,
            })?;
        self.cells(column)
    }

    /// A column that may be missing from the file; missing reads as all blanks.
    pub fn optional(&self, column: &str) -> Result<Vec<Option<String>>, TransformError> {
        if self.has_column(column) {
            self.cells(column)
        } else {
            Ok(vec![None; self.height()])
        }
    }
}

/// One row of `movies_metadata.csv`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMovie {
    pub id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub imdb_id: Option<String>,
    pub status: Option<String>,
    pub budget: Option<String>,
    pub revenue: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<String>,
    pub popularity: Option<String>,
    pub vote_average: Option<String>,
    pub vote_count: Option<String>,
    pub genres: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub spoken_languages: Option<String>,
}

impl RawMovie {
    pub fn rows(raw: &RawFrame<'_>) -> Result<Vec<Self>, TransformError> {
        let mut id = raw.required("id")?.into_iter();
        let mut title = raw.required("title")?.into_iter();
        let mut status = raw.required("status")?.into_iter();
        let mut budget = raw.required("budget")?.into_iter();
        let mut revenue = raw.required("revenue")?.into_iter();
        let mut release_date = raw.required("release_date")?.into_iter();
        let mut genres = raw.required("genres")?.into_iter();
        let mut original_title = raw.optional("original_title")?.into_iter();
        let mut original_language = raw.optional("original_language")?.into_iter();
        let mut overview = raw.optional("overview")?.into_iter();
        let mut tagline = raw.optional("tagline")?.into_iter();
        let mut imdb_id = raw.optional("imdb_id")?.into_iter();
        let mut runtime = raw.optional("runtime")?.into_iter();
        let mut popularity = raw.optional("popularity")?.into_iter();
        let mut vote_average = raw.optional("vote_average")?.into_iter();
        let mut vote_count = raw.optional("vote_count")?.into_iter();
        let mut production_companies = raw.optional("production_companies")?.into_iter();
        let mut production_countries = raw.optional("production_countries")?.into_iter();
        let mut spoken_languages = raw.optional("spoken_languages")?.into_iter();

        Ok((0..raw.height())
            .map(|_| Self {
                id: id.next().flatten(),
                title: title.next().flatten(),
                original_title: original_title.next().flatten(),
                original_language: original_language.next().flatten(),
                overview: overview.next().flatten(),
                tagline: tagline.next().flatten(),
                imdb_id: imdb_id.next().flatten(),
                status: status.next().flatten(),
                budget: budget.next().flatten(),
                revenue: revenue.next().flatten(),
                release_date: release_date.next().flatten(),
                runtime: runtime.next().flatten(),
                popularity: popularity.next().flatten(),
                vote_average: vote_average.next().flatten(),
                vote_count: vote_count.next().flatten(),
                genres: genres.next().flatten(),
                production_companies: production_companies.next().flatten(),
                production_countries: production_countries.next().flatten(),
                spoken_languages: spoken_languages.next().flatten(),
            })
            .collect())
    }
}

/// One row of `credits.csv`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCredits {
    pub id: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

impl RawCredits {
    pub fn rows(raw: &RawFrame<'_>) -> Result<Vec<Self>, TransformError> {
        let id = raw.required("id")?;
        let cast = raw.required("cast")?;
        let crew = raw.required("crew")?;
        Ok(id
            .into_iter()
            .zip(cast)
            .zip(crew)
            .map(|((id, cast), crew)| Self { id, cast, crew })
            .collect())
    }
}

/// One row of `keywords.csv`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawKeywords {
    pub id: Option<String>,
    pub keywords: Option<String>,
}

impl RawKeywords {
    pub fn rows(raw: &RawFrame<'_>) -> Result<Vec<Self>, TransformError> {
        let id = raw.required("id")?;
        let keywords = raw.required("keywords")?;
        Ok(id
            .into_iter()
            .zip(keywords)
            .map(|(id, keywords)| Self { id, keywords })
            .collect())
    }
}

/// One row of `ratings_small.csv`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRating {
    pub user_id: Option<String>,
    pub movie_id: Option<String>,
    pub rating: Option<String>,
    pub timestamp: Option<String>,
}

impl RawRating {
    pub fn rows(raw: &RawFrame<'_>) -> Result<Vec<Self>, TransformError> {
        let user_id = raw.required("userId")?;
        let movie_id = raw.required("movieId")?;
        let rating = raw.required("rating")?;
        let timestamp = raw.required("timestamp")?;
        Ok(user_id
            .into_iter()
            .zip(movie_id)
            .zip(rating)
            .zip(timestamp)
            .map(|(((user_id, movie_id), rating), timestamp)| Self {
                user_id,
                movie_id,
                rating,
                timestamp,
            })
            .collect())
    }
}
