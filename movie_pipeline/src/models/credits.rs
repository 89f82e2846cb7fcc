//! Normalized side tables keyed by movie id: `credits` and `keywords`.

use polars::prelude::*;

use crate::io::frame::{self, column, list_column, required};
use crate::io::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Credits {
    pub id: i64,
    /// Leading cast members in billing order.
    pub cast_names: Vec<String>,
    pub director: Option<String>,
}

impl Table for Credits {
    const NAME: &'static str = "credits";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("id", rows.iter().map(|c| c.id).collect::<Vec<_>>()),
            list_column("cast_names", rows.iter().map(|c| Some(c.cast_names.as_slice()))),
            column("director", rows.iter().map(|c| c.director.as_deref()).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let id = required(frame::read_i64(df, "id")?, "id")?;
        let cast_names = frame::read_str_list(df, "cast_names")?;
        let director = frame::read_str(df, "director")?;
        Ok(id
            .into_iter()
            .zip(cast_names)
            .zip(director)
            .map(|((id, cast_names), director)| Credits {
                id,
                cast_names: cast_names.unwrap_or_default(),
                director,
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keywords {
    pub id: i64,
    pub keyword_names: Vec<String>,
}

impl Table for Keywords {
    const NAME: &'static str = "keywords";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            column("id", rows.iter().map(|k| k.id).collect::<Vec<_>>()),
            list_column(
                "keyword_names",
                rows.iter().map(|k| Some(k.keyword_names.as_slice())),
            ),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let id = required(frame::read_i64(df, "id")?, "id")?;
        let keyword_names = frame::read_str_list(df, "keyword_names")?;
        Ok(id
            .into_iter()
            .zip(keyword_names)
            .map(|(id, keyword_names)| Keywords {
                id,
                keyword_names: keyword_names.unwrap_or_default(),
            })
            .collect())
    }
}
