use chrono::Datelike;

use crate::models::raw::RawMovie;
use crate::models::{Financials, Movie};
use crate::parse::StructuredField;
use crate::parse::fields::{names, parse_date, parse_id, parse_number};

fn number_or_zero(cell: Option<&str>) -> f64 {
    cell.and_then(parse_number).unwrap_or(0.0)
}

fn present(cell: &Option<String>) -> Option<String> {
    cell.as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn name_list(cell: Option<&str>) -> Vec<String> {
    names(&StructuredField::from_cell(cell))
}

/// Normalizes one catalog row.
///
/// Returns `None` when the row has no usable id, title or status. Any other
/// bad field falls back to its default.
pub fn normalize_movie(raw: &RawMovie) -> Option<Movie> {
    let id = raw.id.as_deref().and_then(parse_id)?;

    let genre_names = name_list(raw.genres.as_deref());
    let production_companies = name_list(raw.production_companies.as_deref());
    let production_countries = name_list(raw.production_countries.as_deref());
    let spoken_languages = name_list(raw.spoken_languages.as_deref());

    let budget = number_or_zero(raw.budget.as_deref());
    let revenue = number_or_zero(raw.revenue.as_deref());

    let release_date = raw.release_date.as_deref().and_then(parse_date);
    let release_year = release_date.map(|d| d.year());

    let runtime = raw.runtime.as_deref().and_then(parse_number);
    let popularity = number_or_zero(raw.popularity.as_deref());
    let vote_average = number_or_zero(raw.vote_average.as_deref());
    let vote_count = raw
        .vote_count
        .as_deref()
        .and_then(parse_number)
        .map(|count| count.trunc() as i64)
        .unwrap_or(0);

    let Financials {
        profit,
        has_budget,
        has_revenue,
        roi,
    } = Financials::derive(budget, revenue);

    let title = present(&raw.title)?;
    let status = present(&raw.status)?;

    Some(Movie {
        id,
        title,
        original_title: raw.original_title.clone(),
        original_language: raw.original_language.clone(),
        overview: raw.overview.clone(),
        tagline: raw.tagline.clone(),
        imdb_id: raw.imdb_id.clone(),
        status,
        budget,
        revenue,
        release_date,
        release_year,
        runtime,
        popularity,
        vote_average,
        vote_count,
        genre_names,
        production_companies,
        production_countries,
        spoken_languages,
        profit,
        has_budget,
        has_revenue,
        roi,
    })
}
