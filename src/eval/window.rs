//! `WindowBy` and `ExpandBy` — spec §4.D.

use crate::error::Result;
use crate::ir::WindowAggregation;
use crate::value::{get, Row, Value};

use super::sort;
use crate::ir::SortDirection;

/// Sliding window of exactly `size` consecutive rows, sorted by `key` first.
pub fn window_by(
    rows: Vec<Row>,
    key: &str,
    size: usize,
    aggs: &[WindowAggregation],
) -> Result<Vec<Row>> {
    let sorted = sort::apply(rows, &[(key.to_string(), SortDirection::Ascending)])?;
    if size == 0 || sorted.len() < size {
        return Ok(Vec::new());
    }
    let mut out = Vec::with_capacity(sorted.len() - size + 1);
    for window in sorted.windows(size) {
        out.push(build_window_row(window, key, aggs)?);
    }
    Ok(out)
}

fn build_window_row(window: &[Row], key: &str, aggs: &[WindowAggregation]) -> Result<Row> {
    let mut out = Row::new();
    let key_values: Vec<&Value> = window
        .iter()
        .map(|r| get(r, key).ok_or_else(|| crate::error::Error::data(format!("missing column {key:?}"))))
        .collect::<Result<Vec<_>>>()?;
    for agg in aggs {
        match agg {
            WindowAggregation::Min(field) => {
                let v = fold_float(window, field, f64::INFINITY, f64::min)?;
                out.push((field.clone(), Value::Number(v)));
            }
            WindowAggregation::Max(field) => {
                let v = fold_float(window, field, f64::NEG_INFINITY, f64::max)?;
                out.push((field.clone(), Value::Number(v)));
            }
            WindowAggregation::Sum(field) => {
                let v = fold_float(window, field, 0.0, |a, b| a + b)?;
                out.push((field.clone(), Value::Number(v)));
            }
            WindowAggregation::Mean(field) => {
                let sum = fold_float(window, field, 0.0, |a, b| a + b)?;
                out.push((field.clone(), Value::Number(sum / window.len() as f64)));
            }
            WindowAggregation::FirstKey => {
                out.push((format!("first {key}"), key_values[0].clone()));
            }
            WindowAggregation::LastKey => {
                out.push((format!("last {key}"), key_values[key_values.len() - 1].clone()));
            }
            WindowAggregation::MiddleKey => {
                out.push((
                    format!("middle {key}"),
                    key_values[(key_values.len() - 1) / 2].clone(),
                ));
            }
        }
    }
    Ok(out)
}

fn fold_float(window: &[Row], field: &str, init: f64, f: impl Fn(f64, f64) -> f64) -> Result<f64> {
    let mut acc = init;
    for row in window {
        if let Some(v) = get(row, field) {
            acc = f(acc, v.as_float()?);
        }
    }
    Ok(acc)
}

/// Stateful running aggregators, sorted by `key` first.
pub fn expand_by(rows: Vec<Row>, key: &str, aggs: &[WindowAggregation]) -> Result<Vec<Row>> {
    let sorted = sort::apply(rows, &[(key.to_string(), SortDirection::Ascending)])?;
    let mut states: Vec<ExpandState> = aggs.iter().map(ExpandState::new).collect();
    let mut out = Vec::with_capacity(sorted.len());
    for row in &sorted {
        let key_value = get(row, key)
            .ok_or_else(|| crate::error::Error::data(format!("missing column {key:?}")))?
            .clone();
        let mut out_row = Row::new();
        for state in &mut states {
            out_row.push(state.step(row, key, &key_value)?);
        }
        out.push(out_row);
    }
    Ok(out)
}

enum ExpandState {
    Sum { field: String, total: f64 },
    Min { field: String, value: Option<f64> },
    Max { field: String, value: Option<f64> },
    /// Faithfully reproduces the running-mean quirk where `count` accumulates
    /// the observed value itself rather than `1` (see spec §9).
    Mean { field: String, sum: f64, count: f64 },
    FirstKey { value: Option<Value> },
    LastKey,
    MiddleKey { buffer: Vec<Value> },
}

impl ExpandState {
    fn new(agg: &WindowAggregation) -> Self {
        match agg {
            WindowAggregation::Sum(f) => ExpandState::Sum {
                field: f.clone(),
                total: 0.0,
            },
            WindowAggregation::Min(f) => ExpandState::Min {
                field: f.clone(),
                value: None,
            },
            WindowAggregation::Max(f) => ExpandState::Max {
                field: f.clone(),
                value: None,
            },
            WindowAggregation::Mean(f) => ExpandState::Mean {
                field: f.clone(),
                sum: 0.0,
                count: 0.0,
            },
            WindowAggregation::FirstKey => ExpandState::FirstKey { value: None },
            WindowAggregation::LastKey => ExpandState::LastKey,
            WindowAggregation::MiddleKey => ExpandState::MiddleKey { buffer: Vec::new() },
        }
    }

    fn step(&mut self, row: &Row, key: &str, key_value: &Value) -> Result<(String, Value)> {
        match self {
            ExpandState::Sum { field, total } => {
                *total += cell_float(row, field)?;
                Ok((field.clone(), Value::Number(*total)))
            }
            ExpandState::Min { field, value } => {
                let v = cell_float(row, field)?;
                let updated = value.map_or(v, |cur| cur.min(v));
                *value = Some(updated);
                Ok((field.clone(), Value::Number(updated)))
            }
            ExpandState::Max { field, value } => {
                let v = cell_float(row, field)?;
                let updated = value.map_or(v, |cur| cur.max(v));
                *value = Some(updated);
                Ok((field.clone(), Value::Number(updated)))
            }
            ExpandState::Mean { field, sum, count } => {
                let v = cell_float(row, field)?;
                *sum += v;
                *count += v;
                let mean = if *count == 0.0 { 0.0 } else { *sum / *count };
                Ok((field.clone(), Value::Number(mean)))
            }
            ExpandState::FirstKey { value } => {
                let v = value.get_or_insert_with(|| key_value.clone()).clone();
                Ok((format!("first {key}"), v))
            }
            ExpandState::LastKey => Ok((format!("last {key}"), key_value.clone())),
            ExpandState::MiddleKey { buffer } => {
                buffer.push(key_value.clone());
                let mid = buffer[buffer.len() / 2].clone();
                Ok((format!("middle {key}"), mid))
            }
        }
    }
}

fn cell_float(row: &Row, field: &str) -> Result<f64> {
    get(row, field)
        .ok_or_else(|| crate::error::Error::data(format!("missing column {field:?}")))?
        .as_float()
}
