//! Narrow I/O seams the dispatcher plugs into — spec §6, §4.G.
//!
//! Kept as plain traits so the dispatcher can be exercised in tests without
//! a real SQL client, the way the teacher keeps its own compiler core
//! ignorant of the filesystem and network collaborators that call into it.

use chrono::{DateTime, FixedOffset};

use crate::error::{Error, Result};
use crate::types::{InferredType, Metadata};
use crate::value::{Row, Value};

/// A SQL client collaborator. `row_mapper` is applied to each result row as
/// it streams back, mirroring the spec's own
/// `execute_reader(connection_string, sql, row_mapper)` shape.
pub trait SqlReader {
    fn execute_reader<T>(
        &self,
        connection_string: &str,
        sql: &str,
        row_mapper: impl Fn(&dyn SqlRow) -> Result<T>,
    ) -> Result<Vec<T>>;
}

/// Per-column accessors a SQL result row must expose (spec §6).
pub trait SqlRow {
    fn is_null(&self, col: &str) -> bool;
    fn get_string(&self, col: &str) -> Option<String>;
    fn get_bool(&self, col: &str) -> Option<bool>;
    fn get_date(&self, col: &str) -> Option<DateTime<FixedOffset>>;
    fn get_int32(&self, col: &str) -> Option<i32>;
    fn get_float(&self, col: &str) -> Option<f64>;
}

/// Materializes one SQL result row into a typed [`Row`], guided by
/// `metadata` — spec §4.F "Result reading".
pub fn materialize_row(row: &dyn SqlRow, metadata: &Metadata) -> Result<Row> {
    let mut out = Row::new();
    for (name, ty) in metadata {
        let value = match ty {
            InferredType::String | InferredType::Any => {
                Value::String(row.get_string(name).unwrap_or_default())
            }
            InferredType::Bool | InferredType::OneZero => {
                require_non_null(row, name)?;
                Value::Bool(row.get_bool(name).unwrap_or(false))
            }
            InferredType::Date(_) => {
                require_non_null(row, name)?;
                Value::Date(
                    row.get_date(name)
                        .ok_or_else(|| Error::data(format!("invalid date in column {name:?}")))?,
                )
            }
            InferredType::Int => {
                require_non_null(row, name)?;
                Value::Number(row.get_int32(name).unwrap_or(0) as f64)
            }
            InferredType::Float => {
                require_non_null(row, name)?;
                Value::Number(row.get_float(name).unwrap_or(0.0))
            }
        };
        out.push((name.clone(), value));
    }
    Ok(out)
}

fn require_non_null(row: &dyn SqlRow, name: &str) -> Result<()> {
    if row.is_null(name) {
        Err(Error::null_in(name.to_string()))
    } else {
        Ok(())
    }
}

/// Object-safe erasure of [`SqlReader`]'s generic method, so the dispatcher
/// can hold a boxed collaborator without itself being generic.
pub(crate) trait SqlReaderDyn {
    fn read_rows(&self, connection_string: &str, sql: &str, metadata: &Metadata) -> Result<Vec<Row>>;
}

impl<R: SqlReader> SqlReaderDyn for R {
    fn read_rows(&self, connection_string: &str, sql: &str, metadata: &Metadata) -> Result<Vec<Row>> {
        self.execute_reader(connection_string, sql, |row| materialize_row(row, metadata))
    }
}
