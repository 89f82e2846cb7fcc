//! The normalized movie record (silver `movies`).

use chrono::NaiveDate;
use polars::prelude::*;

use crate::io::frame::{self, column, date_column, list_column, required};
use crate::io::table::Table;

/// Derived financial metrics of a movie.
///
/// `profit` is always defined. `roi` is a percentage and only exists when
/// there is a budget to divide by; a loss gives a negative roi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Financials {
    pub profit: f64,
    pub has_budget: bool,
    pub has_revenue: bool,
    pub roi: Option<f64>,
}

impl Financials {
    pub fn derive(budget: f64, revenue: f64) -> Self {
        let profit = revenue - budget;
        let has_budget = budget > 0.0;
        Self {
            profit,
            has_budget,
            has_revenue: revenue > 0.0,
            roi: has_budget.then(|| profit / budget * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub imdb_id: Option<String>,
    pub status: String,
    pub budget: f64,
    pub revenue: f64,
    pub release_date: Option<NaiveDate>,
    pub release_year: Option<i32>,
    /// Minutes; unknown runtimes stay `None`.
    pub runtime: Option<f64>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub genre_names: Vec<String>,
    pub production_companies: Vec<String>,
    pub production_countries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub profit: f64,
    pub has_budget: bool,
    pub has_revenue: bool,
    pub roi: Option<f64>,
}

fn lists_or_empty(values: Vec<Option<Vec<String>>>) -> Vec<Vec<String>> {
    values.into_iter().map(Option::unwrap_or_default).collect()
}

impl Table for Movie {
    const NAME: &'static str = "movies";

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let dates: Vec<Option<NaiveDate>> = rows.iter().map(|m| m.release_date).collect();
        DataFrame::new(vec![
            column("id", rows.iter().map(|m| m.id).collect::<Vec<_>>()),
            column("title", rows.iter().map(|m| m.title.as_str()).collect::<Vec<_>>()),
            column(
                "original_title",
                rows.iter().map(|m| m.original_title.as_deref()).collect::<Vec<_>>(),
            ),
            column(
                "original_language",
                rows.iter().map(|m| m.original_language.as_deref()).collect::<Vec<_>>(),
            ),
            column("overview", rows.iter().map(|m| m.overview.as_deref()).collect::<Vec<_>>()),
            column("tagline", rows.iter().map(|m| m.tagline.as_deref()).collect::<Vec<_>>()),
            column("imdb_id", rows.iter().map(|m| m.imdb_id.as_deref()).collect::<Vec<_>>()),
            column("status", rows.iter().map(|m| m.status.as_str()).collect::<Vec<_>>()),
            column("budget", rows.iter().map(|m| m.budget).collect::<Vec<_>>()),
            column("revenue", rows.iter().map(|m| m.revenue).collect::<Vec<_>>()),
            date_column("release_date", &dates),
            column("release_year", rows.iter().map(|m| m.release_year).collect::<Vec<_>>()),
            column("runtime", rows.iter().map(|m| m.runtime).collect::<Vec<_>>()),
            column("popularity", rows.iter().map(|m| m.popularity).collect::<Vec<_>>()),
            column("vote_average", rows.iter().map(|m| m.vote_average).collect::<Vec<_>>()),
            column("vote_count", rows.iter().map(|m| m.vote_count).collect::<Vec<_>>()),
            list_column("genre_names", rows.iter().map(|m| Some(m.genre_names.as_slice()))),
            list_column(
                "production_companies",
                rows.iter().map(|m| Some(m.production_companies.as_slice())),
            ),
            list_column(
                "production_countries",
                rows.iter().map(|m| Some(m.production_countries.as_slice())),
            ),
            list_column("spoken_languages", rows.iter().map(|m| Some(m.spoken_languages.as_slice()))),
            column("profit", rows.iter().map(|m| m.profit).collect::<Vec<_>>()),
            column("has_budget", rows.iter().map(|m| m.has_budget).collect::<Vec<_>>()),
            column("has_revenue", rows.iter().map(|m| m.has_revenue).collect::<Vec<_>>()),
            column("roi", rows.iter().map(|m| m.roi).collect::<Vec<_>>()),
        ])
    }

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>> {
        let id = required(frame::read_i64(df, "id")?, "id")?;
        let title = required(frame::read_str(df, "title")?, "title")?;
        let original_title = frame::read_str(df, "original_title")?;
        let original_language = frame::read_str(df, "original_language")?;
        let overview = frame::read_str(df, "overview")?;
        let tagline = frame::read_str(df, "tagline")?;
        let imdb_id = frame::read_str(df, "imdb_id")?;
        let status = required(frame::read_str(df, "status")?, "status")?;
        let budget = required(frame::read_f64(df, "budget")?, "budget")?;
        let revenue = required(frame::read_f64(df, "revenue")?, "revenue")?;
        let release_date = frame::read_date(df, "release_date")?;
        let release_year = frame::read_i32(df, "release_year")?;
        let runtime = frame::read_f64(df, "runtime")?;
        let popularity = required(frame::read_f64(df, "popularity")?, "popularity")?;
        let vote_average = required(frame::read_f64(df, "vote_average")?, "vote_average")?;
        let vote_count = required(frame::read_i64(df, "vote_count")?, "vote_count")?;
        let genre_names = lists_or_empty(frame::read_str_list(df, "genre_names")?);
        let production_companies =
            lists_or_empty(frame::read_str_list(df, "production_companies")?);
        let production_countries =
            lists_or_empty(frame::read_str_list(df, "production_countries")?);
        let spoken_languages = lists_or_empty(frame::read_str_list(df, "spoken_languages")?);
        let profit = required(frame::read_f64(df, "profit")?, "profit")?;
        let has_budget = required(frame::read_bool(df, "has_budget")?, "has_budget")?;
        let has_revenue = required(frame::read_bool(df, "has_revenue")?, "has_revenue")?;
        let roi = frame::read_f64(df, "roi")?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            rows.push(Movie {
                id: id[i],
                title: title[i].clone(),
                original_title: original_title[i].clone(),
                original_language: original_language[i].clone(),
                overview: overview[i].clone(),
                tagline: tagline[i].clone(),
                imdb_id: imdb_id[i].clone(),
                status: status[i].clone(),
                budget: budget[i],
                revenue: revenue[i],
                release_date: release_date[i],
                release_year: release_year[i],
                runtime: runtime[i],
                popularity: popularity[i],
                vote_average: vote_average[i],
                vote_count: vote_count[i],
                genre_names: genre_names[i].clone(),
                production_companies: production_companies[i].clone(),
                production_countries: production_countries[i].clone(),
                spoken_languages: spoken_languages[i].clone(),
                profit: profit[i],
                has_budget: has_budget[i],
                has_revenue: has_revenue[i],
                roi: roi[i],
            });
        }
        Ok(rows)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::movie;
    use super::*;

    #[test]
    fn roi_needs_a_budget() {
        let fin = Financials::derive(0.0, 500.0);
        assert_eq!(fin.profit, 500.0);
        assert_eq!(fin.roi, None);
        assert!(!fin.has_budget);
        assert!(fin.has_revenue);
    }

    #[test]
    fn roi_is_a_percentage_and_may_be_negative() {
        assert_eq!(Financials::derive(2_000_000.0, 3_000_000.0).roi, Some(50.0));
        assert_eq!(Financials::derive(1_000_000.0, 2_000_000.0).roi, Some(100.0));
        assert_eq!(Financials::derive(100.0, 50.0).roi, Some(-50.0));
    }

    #[test]
    fn frame_round_trip_keeps_nulls_and_lists() {
        let mut a = movie(1, Some(1995), 100.0, 50.0);
        a.genre_names = vec!["Action".into(), "Drama".into()];
        a.tagline = Some("Tag".into());
        let mut b = movie(2, None, 0.0, 0.0);
        b.runtime = None;

        let rows = vec![a, b];
        let df = Movie::to_frame(&rows).unwrap();
        assert_eq!(df.get_column_names()[0].as_str(), "id");
        assert_eq!(df.width(), 24);
        assert_eq!(Movie::from_frame(&df).unwrap(), rows);
    }
}
