//! Record types for each pipeline layer.

pub mod analytics;
pub mod credits;
pub mod enriched;
pub mod movie;
pub mod rating;
pub mod raw;

pub use analytics::{DirectorStats, GenreStats, RankCriterion, TopMovie, YearlyStats};
pub use credits::{Credits, Keywords};
pub use enriched::EnrichedMovie;
pub use movie::{Financials, Movie};
pub use rating::Rating;
