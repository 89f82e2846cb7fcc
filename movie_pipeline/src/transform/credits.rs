use crate::models::Credits;
use crate::models::raw::RawCredits;
use crate::parse::StructuredField;
use crate::parse::fields::{cast_names, director_of, parse_id};

/// Normalizes one credits row, keeping the first `cast_limit` cast entries.
pub fn normalize_credits(raw: &RawCredits, cast_limit: usize) -> Option<Credits> {
    let id = raw.id.as_deref().and_then(parse_id)?;
    let cast = StructuredField::from_cell(raw.cast.as_deref());
    let crew = StructuredField::from_cell(raw.crew.as_deref());

    Some(Credits {
        id,
        cast_names: cast_names(&cast, cast_limit),
        director: director_of(&crew),
    })
}
