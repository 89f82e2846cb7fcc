use std::collections::HashMap;

use crate::models::{Credits, EnrichedMovie, Keywords, Movie};

fn index_by_id<T>(rows: &[T], id: impl Fn(&T) -> i64) -> HashMap<i64, Vec<&T>> {
    let mut index: HashMap<i64, Vec<&T>> = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(id(row)).or_default().push(row);
    }
    index
}

/// Left-joins movies with their credits, then with their keywords, on id.
///
/// A movie yields one row per matching (credits, keywords) pair, in movie
/// order then side-table order. A movie with no match on a side keeps a
/// single row with that side's columns null.
pub fn enrich(movies: Vec<Movie>, credits: &[Credits], keywords: &[Keywords]) -> Vec<EnrichedMovie> {
    let credits_by_id = index_by_id(credits, |c| c.id);
    let keywords_by_id = index_by_id(keywords, |k| k.id);

    let mut enriched = Vec::with_capacity(movies.len());
    for movie in movies {
        let credit_rows: Vec<Option<&Credits>> = match credits_by_id.get(&movie.id) {
            Some(rows) => rows.iter().map(|c| Some(*c)).collect(),
            None => vec![None],
        };
        let keyword_rows: Vec<Option<&Keywords>> = match keywords_by_id.get(&movie.id) {
            Some(rows) => rows.iter().map(|k| Some(*k)).collect(),
            None => vec![None],
        };

        for &credit in &credit_rows {
            for &keyword in &keyword_rows {
                enriched.push(EnrichedMovie {
                    movie: movie.clone(),
                    cast_names: credit.map(|c| c.cast_names.clone()),
                    director: credit.and_then(|c| c.director.clone()),
                    keyword_names: keyword.map(|k| k.keyword_names.clone()),
                });
            }
        }
    }
    enriched
}
