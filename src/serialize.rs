//! JSON emission — spec §4.E.

use serde_json::{Map, Number, Value as Json};

use crate::ir::Action;
use crate::types::{format_type, Metadata};
use crate::value::{Row, Value};

/// Renders a cell the way the wire format expects it (spec §4.E):
/// `Date` as an ISO-8601 extended instant string, everything else by its
/// natural JSON shape.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => Number::from_f64(*n).map(Json::Number).unwrap_or(Json::Null),
        Value::String(s) => Json::String(s.clone()),
        Value::Date(d) => Json::String(d.to_rfc3339()),
    }
}

fn row_to_json(row: &Row) -> Json {
    let mut map = Map::with_capacity(row.len());
    for (name, value) in row {
        map.insert(name.clone(), value_to_json(value));
    }
    Json::Object(map)
}

/// `GetTheData` — array of records preserving column order.
pub fn records(rows: &[Row]) -> Json {
    Json::Array(rows.iter().map(row_to_json).collect())
}

/// `GetSeries(k, v)` — array of `[key, value]` 2-tuples.
pub fn series(rows: &[Row], k: &str, v: &str) -> Json {
    let pairs = rows
        .iter()
        .map(|row| {
            let key = crate::value::get(row, k).map(value_to_json).unwrap_or(Json::Null);
            let val = crate::value::get(row, v).map(value_to_json).unwrap_or(Json::Null);
            Json::Array(vec![key, val])
        })
        .collect();
    Json::Array(pairs)
}

/// `GetRange(f)` — distinct values of column `f`, first-occurrence order.
pub fn range(rows: &[Row], field: &str) -> Json {
    let mut seen: Vec<Value> = Vec::new();
    for row in rows {
        if let Some(v) = crate::value::get(row, field) {
            if !seen.contains(v) {
                seen.push(v.clone());
            }
        }
    }
    Json::Array(seen.iter().map(value_to_json).collect())
}

/// `Metadata` — object mapping each column name to its external type name.
pub fn metadata(meta: &Metadata) -> Json {
    let mut map = Map::with_capacity(meta.len());
    for (name, ty) in meta {
        map.insert(name.clone(), Json::String(format_type(ty).to_string()));
    }
    Json::Object(map)
}

/// Applies the resolved action over the (already paged/previewed) row set.
pub fn apply_action(rows: &[Row], meta: &Metadata, action: &Action) -> Json {
    match action {
        Action::GetTheData => records(rows),
        Action::GetSeries(k, v) => series(rows, k, v),
        Action::GetRange(f) => range(rows, f),
        Action::Metadata => metadata(meta),
    }
}
