//! Typed column access over Polars frames.
//!
//! Record types convert themselves to and from [`DataFrame`]s through these
//! helpers so the rest of the crate never touches raw Polars chunked arrays.

use chrono::NaiveDate;
use polars::prelude::*;

/// Separator used when a list column has to be flattened into plain text.
pub const LIST_SEPARATOR: &str = "|";

fn series<'a>(df: &'a DataFrame, name: &str) -> PolarsResult<&'a Series> {
    Ok(df.column(name)?.as_materialized_series())
}

/// Builds a column from any value vector Polars knows how to name.
pub fn column<T, Phantom: ?Sized>(name: &str, values: T) -> Column
where
    Series: NamedFrom<T, Phantom>,
{
    Column::new(name.into(), values)
}

/// Builds a `Date` column from optional calendar dates.
pub fn date_column(name: &str, values: &[Option<NaiveDate>]) -> Column {
    DateChunked::from_naive_date_options(name.into(), values.iter().copied())
        .into_series()
        .into()
}

/// Builds a `List(String)` column. `None` rows become nulls, `Some(&[])` an empty list.
pub fn list_column<'a>(
    name: &str,
    rows: impl ExactSizeIterator<Item = Option<&'a [String]>>,
) -> Column {
    let capacity = rows.len();
    let mut builder = ListStringChunkedBuilder::new(name.into(), capacity, capacity * 4);
    for row in rows {
        match row {
            Some(values) => builder.append_values_iter(values.iter().map(String::as_str)),
            None => builder.append_null(),
        }
    }
    builder.finish().into_series().into()
}

pub fn read_i64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let values = series(df, name)?.cast(&DataType::Int64)?;
    Ok(values.i64()?.into_iter().collect())
}

pub fn read_i32(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i32>>> {
    let values = series(df, name)?.cast(&DataType::Int32)?;
    Ok(values.i32()?.into_iter().collect())
}

pub fn read_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let values = series(df, name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

pub fn read_bool(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<bool>>> {
    Ok(series(df, name)?.bool()?.into_iter().collect())
}

pub fn read_str(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let values = series(df, name)?.cast(&DataType::String)?;
    Ok(values
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

pub fn read_date(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let dates = series(df, name)?.cast(&DataType::Date)?;
    Ok(dates.date()?.as_date_iter().collect())
}

pub fn read_str_list(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<Vec<String>>>> {
    str_lists(series(df, name)?)
}

/// Decodes a `List(String)` series row by row. Null list items are skipped.
pub fn str_lists(series: &Series) -> PolarsResult<Vec<Option<Vec<String>>>> {
    series
        .list()?
        .into_iter()
        .map(|row| {
            row.map(|inner| {
                inner
                    .str()
                    .map(|values| values.into_iter().flatten().map(str::to_string).collect())
            })
            .transpose()
        })
        .collect()
}

/// Unwraps a column that must not contain nulls.
pub fn required<T>(values: Vec<Option<T>>, name: &str) -> PolarsResult<Vec<T>> {
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| {
                PolarsError::ComputeError(
                    format!("column `{name}` has a null at row {row}").into(),
                )
            })
        })
        .collect()
}

/// Replaces every list column with its `|`-joined text so the frame fits a CSV file.
pub fn flatten_lists(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|col| match col.dtype() {
            DataType::List(_) => {
                let joined: Vec<Option<String>> = str_lists(col.as_materialized_series())?
                    .into_iter()
                    .map(|row| row.map(|values| values.join(LIST_SEPARATOR)))
                    .collect();
                Ok(Column::new(col.name().clone(), joined))
            }
            _ => Ok(col.clone()),
        })
        .collect::<PolarsResult<Vec<_>>>()?;
    DataFrame::new(columns)
}
