//! Group-by-reduce over movies.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::models::Movie;

/// Running sums for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    pub count: i64,
    pub budget: f64,
    pub revenue: f64,
    pub profit: f64,
    pub rating: f64,
    pub popularity: f64,
    runtime: f64,
    runtime_count: i64,
}

impl Accumulator {
    pub fn add(&mut self, movie: &Movie) {
        self.count += 1;
        self.budget += movie.budget;
        self.revenue += movie.revenue;
        self.profit += movie.profit;
        self.rating += movie.vote_average;
        self.popularity += movie.popularity;
        if let Some(runtime) = movie.runtime {
            self.runtime += runtime;
            self.runtime_count += 1;
        }
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / self.count as f64
        }
    }

    pub fn avg_budget(&self) -> f64 {
        self.mean(self.budget)
    }

    pub fn avg_revenue(&self) -> f64 {
        self.mean(self.revenue)
    }

    pub fn avg_profit(&self) -> f64 {
        self.mean(self.profit)
    }

    pub fn avg_rating(&self) -> f64 {
        self.mean(self.rating)
    }

    pub fn avg_popularity(&self) -> f64 {
        self.mean(self.popularity)
    }

    /// `None` when no movie in the group has a known runtime.
    pub fn avg_runtime(&self) -> Option<f64> {
        (self.runtime_count > 0).then(|| self.runtime / self.runtime_count as f64)
    }
}

/// Reduces `(key, movie)` pairs into one accumulator per key, in first-seen order.
pub fn group_by<'a, K, I>(pairs: I) -> IndexMap<K, Accumulator>
where
    K: Hash + Eq,
    I: IntoIterator<Item = (K, &'a Movie)>,
{
    let mut groups: IndexMap<K, Accumulator> = IndexMap::new();
    for (key, movie) in pairs {
        groups.entry(key).or_default().add(movie);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::fixtures::movie;

    #[test]
    fn averages_skip_unknown_runtimes_only() {
        let a = movie(1, Some(2000), 100.0, 300.0);
        let mut b = movie(2, Some(2000), 0.0, 100.0);
        b.runtime = None;

        let groups = group_by([("x", &a), ("x", &b)]);
        let acc = &groups["x"];
        assert_eq!(acc.count, 2);
        assert_eq!(acc.avg_budget(), 50.0);
        assert_eq!(acc.avg_revenue(), 200.0);
        assert_eq!(acc.avg_runtime(), Some(100.0));
    }

    #[test]
    fn group_without_runtimes_has_no_average() {
        let mut a = movie(1, None, 0.0, 0.0);
        a.runtime = None;
        let groups = group_by([(1, &a)]);
        assert_eq!(groups[&1].avg_runtime(), None);
    }
}
