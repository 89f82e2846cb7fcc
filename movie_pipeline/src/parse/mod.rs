pub mod fields;
pub mod literal;

pub use literal::{LiteralError, StructuredField, parse_literal};
