use crate::load::stats::group_by;
use crate::models::{EnrichedMovie, GenreStats, Movie};

/// Fans movies out to one `(genre, movie)` pair per genre entry.
pub fn genre_pairs(movies: &[EnrichedMovie]) -> Vec<(&str, &Movie)> {
    movies
        .iter()
        .flat_map(|row| {
            row.movie
                .genre_names
                .iter()
                .map(move |genre| (genre.as_str(), &row.movie))
        })
        .collect()
}

/// One row per genre, most frequent first.
pub fn genre_stats(movies: &[EnrichedMovie]) -> Vec<GenreStats> {
    let mut rows: Vec<GenreStats> = group_by(genre_pairs(movies))
        .into_iter()
        .map(|(genre, acc)| GenreStats {
            genre: genre.to_string(),
            movie_count: acc.count,
            avg_budget: acc.avg_budget(),
            total_revenue: acc.revenue,
            avg_revenue: acc.avg_revenue(),
            avg_profit: acc.avg_profit(),
            avg_rating: acc.avg_rating(),
            avg_popularity: acc.avg_popularity(),
            avg_runtime: acc.avg_runtime(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.movie_count
            .cmp(&a.movie_count)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::fixtures::movie;

    fn with_genres(id: i64, genres: &[&str]) -> EnrichedMovie {
        let mut m = movie(id, Some(2000), 10.0, 20.0);
        m.genre_names = genres.iter().map(|g| g.to_string()).collect();
        EnrichedMovie::bare(m)
    }

    #[test]
    fn each_genre_entry_is_one_contribution() {
        let movies = vec![
            with_genres(1, &["Action", "Drama", "Thriller"]),
            with_genres(2, &["Drama"]),
            with_genres(3, &[]),
        ];
        assert_eq!(genre_pairs(&movies[..1]).len(), 3);
        assert_eq!(genre_pairs(&movies).len(), 4);

        let rows = genre_stats(&movies);
        let order: Vec<(&str, i64)> = rows.iter().map(|r| (r.genre.as_str(), r.movie_count)).collect();
        assert_eq!(order, vec![("Drama", 2), ("Action", 1), ("Thriller", 1)]);
        assert_eq!(rows[0].total_revenue, 40.0);
    }
}
