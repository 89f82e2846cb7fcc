//! Per-stage statistics: which tables were written and how big they are.

use std::fmt;

use indexmap::IndexMap;
use polars::prelude::DataFrame;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

impl TableShape {
    pub fn of(df: &DataFrame) -> Self {
        Self {
            rows: df.height(),
            columns: df.width(),
        }
    }
}

/// Tables produced by a stage, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    tables: IndexMap<String, TableShape>,
}

impl StageReport {
    pub fn record(&mut self, table: impl Into<String>, shape: TableShape) {
        self.tables.insert(table.into(), shape);
    }

    pub fn get(&self, table: &str) -> Option<&TableShape> {
        self.tables.get(table)
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, shape)) in self.tables.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {} rows x {} columns", shape.rows, shape.columns)?;
        }
        Ok(())
    }
}
