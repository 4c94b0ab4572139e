//! The evaluator — spec §4.D: folds a transformation pipeline over a row
//! sequence, one stage at a time.

mod filter;
mod group;
mod paging;
mod sort;
mod window;

use crate::error::Result;
use crate::ir::Transformation;
use crate::value::Row;

pub use filter::eval_condition;

/// Folds `transformations` over `rows` in order, tracing each stage's
/// input/output row counts the way the teacher's compiler passes trace
/// their IR transitions.
pub fn evaluate(rows: Vec<Row>, transformations: &[Transformation]) -> Result<Vec<Row>> {
    let mut current = rows;
    for t in transformations {
        let before = current.len();
        current = apply_one(current, t)?;
        log::trace!("{}: {before} rows in, {} rows out", stage_name(t), current.len());
    }
    Ok(current)
}

fn apply_one(rows: Vec<Row>, t: &Transformation) -> Result<Vec<Row>> {
    match t {
        Transformation::DropColumns(cols) => Ok(drop_columns(rows, cols)),
        Transformation::SortBy(keys) => sort::apply(rows, keys),
        Transformation::FilterBy { op, conditions } => filter::apply(rows, *op, conditions),
        Transformation::GroupBy { keys, aggs } => group::apply(rows, keys, aggs),
        Transformation::WindowBy { key, size, aggs } => window::window_by(rows, key, *size, aggs),
        Transformation::ExpandBy { key, aggs } => window::expand_by(rows, key, aggs),
        Transformation::Paging(ops) => paging::apply(rows, ops),
        Transformation::Empty => Ok(rows),
    }
}

fn drop_columns(rows: Vec<Row>, cols: &[String]) -> Vec<Row> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .filter(|(name, _)| !cols.iter().any(|c| c == name))
                .collect()
        })
        .collect()
}

fn stage_name(t: &Transformation) -> &'static str {
    match t {
        Transformation::DropColumns(_) => "drop",
        Transformation::SortBy(_) => "sort",
        Transformation::FilterBy { .. } => "filter",
        Transformation::GroupBy { .. } => "groupby",
        Transformation::WindowBy { .. } => "windowby",
        Transformation::ExpandBy { .. } => "expandby",
        Transformation::Paging(_) => "paging",
        Transformation::Empty => "empty",
    }
}

/// Truncates to the first 10 rows — the "preview" flag (spec §4.D),
/// applied after the pipeline but before action projection.
pub fn preview_truncate(rows: Vec<Row>) -> Vec<Row> {
    let mut rows = rows;
    rows.truncate(10);
    rows
}
