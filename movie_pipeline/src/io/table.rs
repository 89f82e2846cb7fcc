use polars::prelude::{DataFrame, PolarsResult};

/// A record type persisted as one named table.
///
/// Implementors own their column layout: [`Table::to_frame`] fixes the column
/// order on disk and [`Table::from_frame`] must accept exactly what
/// `to_frame` produced.
pub trait Table: Sized {
    /// File stem of the table inside its layer directory.
    const NAME: &'static str;

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame>;

    fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Self>>;
}
