use crate::load::stats::group_by;
use crate::models::{DirectorStats, EnrichedMovie};

/// One row per director credited on at least `min_movies` movies, highest
/// total revenue first.
pub fn director_stats(movies: &[EnrichedMovie], min_movies: i64) -> Vec<DirectorStats> {
    let pairs = movies
        .iter()
        .filter_map(|row| Some((row.director.as_deref()?, &row.movie)));

    let mut rows: Vec<DirectorStats> = group_by(pairs)
        .into_iter()
        .filter(|(_, acc)| acc.count >= min_movies)
        .map(|(director, acc)| DirectorStats {
            director: director.to_string(),
            movie_count: acc.count,
            avg_budget: acc.avg_budget(),
            total_revenue: acc.revenue,
            avg_revenue: acc.avg_revenue(),
            total_profit: acc.profit,
            avg_profit: acc.avg_profit(),
            avg_rating: acc.avg_rating(),
            avg_popularity: acc.avg_popularity(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_revenue
            .total_cmp(&a.total_revenue)
            .then_with(|| a.director.cmp(&b.director))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::fixtures::movie;

    fn directed(id: i64, director: &str, revenue: f64) -> EnrichedMovie {
        EnrichedMovie {
            director: Some(director.into()),
            ..EnrichedMovie::bare(movie(id, Some(2000), 0.0, revenue))
        }
    }

    #[test]
    fn threshold_applies_after_grouping() {
        let movies = vec![
            directed(1, "Three", 10.0),
            directed(2, "Two", 1000.0),
            directed(3, "Three", 10.0),
            directed(4, "Two", 1000.0),
            directed(5, "Three", 10.0),
            EnrichedMovie::bare(movie(6, Some(2000), 0.0, 0.0)),
        ];

        let rows = director_stats(&movies, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].director, "Three");
        assert_eq!(rows[0].movie_count, 3);
        assert_eq!(rows[0].total_revenue, 30.0);
    }

    #[test]
    fn sorted_by_total_revenue_then_name() {
        let movies = vec![
            directed(1, "B", 5.0),
            directed(2, "A", 5.0),
            directed(3, "C", 50.0),
        ];
        let names: Vec<String> = director_stats(&movies, 1)
            .into_iter()
            .map(|r| r.director)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
