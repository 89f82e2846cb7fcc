use polars::prelude::*;

use crate::io::frame::{self, column, list_column};
use crate::io::table::Table;
use crate::models::movie::Movie;

/// A movie joined with its credits and keywords (gold `movies_enriched`).
///
/// The side fields are `None` when the movie had no matching row, which is
/// distinct from a match with an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMovie {
    pub movie: Movie,
    pub cast_names: Option<Vec<String>>,
    pub director: Option<String>,
    pub keyword_names: Option<Vec<String>>,
}

impl EnrichedMovie {
    pub fn bare(movie: Movie) -> Self {
        Self {
            movie,
            cast_names: None,
            director: None,
            keyword_names: None,
        }
    }
}

impl Table for EnrichedMovie {
    const NAME: &'static str = "movies_enriched";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let movies: Vec<Movie> = rows.iter().map(|r| r.movie.clone()).collect();
        let mut df = Movie::to_frame(&movies)?;
        df.with_column(list_column(
            "cast_names",
            rows.iter().map(|r| r.cast_names.as_deref()),
        ))?;
        df.with_column(column(
            "director",
            rows.iter().map(|r| r.director.as_deref()).collect::<Vec<_>>(),
        ))?;
        df.with_column(list_column(
            "keyword_names",
            rows.iter().map(|r| r.keyword_names.as_deref()),
        ))?;
        Ok(df)
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let movies = Movie::from_frame(df)?;
        let cast_names = frame::read_str_list(df, "cast_names")?;
        let director = frame::read_str(df, "director")?;
        let keyword_names = frame::read_str_list(df, "keyword_names")?;
        Ok(movies
            .into_iter()
            .zip(cast_names)
            .zip(director)
            .zip(keyword_names)
            .map(|(((movie, cast_names), director), keyword_names)| EnrichedMovie {
                movie,
                cast_names,
                director,
                keyword_names,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::fixtures::movie;

    #[test]
    fn unmatched_side_fields_stay_null() {
        let matched = EnrichedMovie {
            movie: movie(1, Some(2000), 10.0, 20.0),
            cast_names: Some(vec![]),
            director: Some("Jane Doe".into()),
            keyword_names: Some(vec!["heist".into()]),
        };
        let unmatched = EnrichedMovie::bare(movie(2, Some(2001), 0.0, 0.0));
        let rows = vec![matched, unmatched];

        let df = EnrichedMovie::to_frame(&rows).unwrap();
        assert_eq!(df.width(), 27);
        assert_eq!(EnrichedMovie::from_frame(&df).unwrap(), rows);
    }
}
