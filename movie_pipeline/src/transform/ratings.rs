use crate::models::Rating;
use crate::models::raw::RawRating;
use crate::parse::fields::{parse_int, parse_number};

/// Normalizes one rating row. Every field is required.
pub fn normalize_rating(raw: &RawRating) -> Option<Rating> {
    let user_id = raw.user_id.as_deref().and_then(parse_int)?;
    let movie_id = raw.movie_id.as_deref().and_then(parse_int)?;
    let rating = raw.rating.as_deref().and_then(parse_number)?;
    let timestamp = raw.timestamp.as_deref().and_then(parse_int)?;
    Some(Rating::new(user_id, movie_id, rating, timestamp))
}
