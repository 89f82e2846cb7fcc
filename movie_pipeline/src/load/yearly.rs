use crate::load::stats::group_by;
use crate::models::{EnrichedMovie, YearlyStats};

/// One row per release year from `min_year` on, ascending.
pub fn yearly_stats(movies: &[EnrichedMovie], min_year: i32) -> Vec<YearlyStats> {
    let pairs = movies.iter().filter_map(|row| {
        let year = row.movie.release_year.filter(|y| *y >= min_year)?;
        Some((year, &row.movie))
    });

    let mut rows: Vec<YearlyStats> = group_by(pairs)
        .into_iter()
        .map(|(release_year, acc)| YearlyStats {
            release_year,
            movie_count: acc.count,
            avg_budget: acc.avg_budget(),
            total_budget: acc.budget,
            avg_revenue: acc.avg_revenue(),
            total_revenue: acc.revenue,
            avg_profit: acc.avg_profit(),
            total_profit: acc.profit,
            avg_rating: acc.avg_rating(),
            avg_popularity: acc.avg_popularity(),
            avg_runtime: acc.avg_runtime(),
        })
        .collect();
    rows.sort_by_key(|r| r.release_year);
    rows
}
