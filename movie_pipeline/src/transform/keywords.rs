use crate::models::Keywords;
use crate::models::raw::RawKeywords;
use crate::parse::StructuredField;
use crate::parse::fields::{names, parse_id};

pub fn normalize_keywords(raw: &RawKeywords) -> Option<Keywords> {
    let id = raw.id.as_deref().and_then(parse_id)?;
    Some(Keywords {
        id,
        keyword_names: names(&StructuredField::from_cell(raw.keywords.as_deref())),
    })
}
