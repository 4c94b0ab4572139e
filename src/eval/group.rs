//! `GroupBy` — spec §4.D.

use itertools::Itertools;

use crate::error::Result;
use crate::ir::GroupAggregation;
use crate::value::{get, Row, Value};

pub fn apply(rows: Vec<Row>, keys: &[String], aggs: &[GroupAggregation]) -> Result<Vec<Row>> {
    let mut groups: Vec<(Vec<Value>, Vec<Row>)> = Vec::new();

    for row in rows {
        let key_values = extract_key(&row, keys);
        match groups.iter_mut().find(|(k, _)| *k == key_values) {
            Some((_, members)) => members.push(row),
            None => groups.push((key_values, vec![row])),
        }
    }

    groups
        .into_iter()
        .map(|(key_values, members)| build_group_row(keys, &key_values, &members, aggs))
        .collect()
}

fn extract_key(row: &Row, keys: &[String]) -> Vec<Value> {
    keys.iter()
        .map(|k| get(row, k).cloned().unwrap_or(Value::String(String::new())))
        .collect()
}

fn build_group_row(
    keys: &[String],
    key_values: &[Value],
    members: &[Row],
    aggs: &[GroupAggregation],
) -> Result<Row> {
    let mut out = Row::new();
    for agg in aggs {
        match agg {
            GroupAggregation::GroupKey => {
                for (name, value) in keys.iter().zip(key_values) {
                    out.push((name.clone(), value.clone()));
                }
            }
            GroupAggregation::CountAll => {
                out.push(("count".to_string(), Value::Number(members.len() as f64)));
            }
            GroupAggregation::CountDistinct(field) => {
                let n = distinct_strings(members, field).len();
                out.push((field.clone(), Value::Number(n as f64)));
            }
            GroupAggregation::ConcatValues(field) => {
                let joined = distinct_strings(members, field).into_iter().join(", ");
                out.push((field.clone(), Value::String(joined)));
            }
            GroupAggregation::Sum(field) => {
                let sum = sum_field(members, field)?;
                out.push((field.clone(), Value::Number(sum)));
            }
            GroupAggregation::Mean(field) => {
                let sum = sum_field(members, field)?;
                let mean = if members.is_empty() {
                    0.0
                } else {
                    sum / members.len() as f64
                };
                out.push((field.clone(), Value::Number(mean)));
            }
        }
    }
    Ok(out)
}

fn distinct_strings(members: &[Row], field: &str) -> Vec<String> {
    members
        .iter()
        .filter_map(|row| get(row, field).map(Value::as_string))
        .unique()
        .collect()
}

fn sum_field(members: &[Row], field: &str) -> Result<f64> {
    let mut total = 0.0;
    for row in members {
        if let Some(v) = get(row, field) {
            total += v.as_float()?;
        }
    }
    Ok(total)
}
