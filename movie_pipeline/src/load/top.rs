//! Ranked top-N slices.
//!
//! Each criterion ranks the dataset independently with a stable sort, so
//! equal keys keep dataset order. The slices are concatenated in
//! [`RankCriterion::ALL`] order.

use crate::models::{EnrichedMovie, RankCriterion, TopMovie};

fn sort_key(criterion: RankCriterion, row: &EnrichedMovie) -> f64 {
    match criterion {
        RankCriterion::Revenue => row.movie.revenue,
        RankCriterion::Profit => row.movie.profit,
        RankCriterion::Rating => row.movie.vote_average,
    }
}

/// The top `n` rows for one criterion. Only the rating slice applies the
/// `min_votes` floor.
pub fn rank(
    movies: &[EnrichedMovie],
    criterion: RankCriterion,
    n: usize,
    min_votes: i64,
) -> Vec<TopMovie> {
    let mut candidates: Vec<&EnrichedMovie> = movies
        .iter()
        .filter(|row| criterion != RankCriterion::Rating || row.movie.vote_count >= min_votes)
        .collect();
    candidates.sort_by(|a, b| sort_key(criterion, b).total_cmp(&sort_key(criterion, a)));

    candidates
        .into_iter()
        .take(n)
        .zip(1..)
        .map(|(row, rank)| TopMovie {
            id: row.movie.id,
            title: row.movie.title.clone(),
            release_year: row.movie.release_year,
            revenue: row.movie.revenue,
            budget: row.movie.budget,
            profit: row.movie.profit,
            roi: row.movie.roi,
            vote_average: row.movie.vote_average,
            vote_count: row.movie.vote_count,
            genre_names: row.movie.genre_names.clone(),
            director: row.director.clone(),
            rank_type: criterion,
            rank,
        })
        .collect()
}

pub fn top_movies(movies: &[EnrichedMovie], n: usize, min_votes: i64) -> Vec<TopMovie> {
    RankCriterion::ALL
        .into_iter()
        .flat_map(|criterion| rank(movies, criterion, n, min_votes))
        .collect()
}
