//! Tagged scalar value model (spec §3, §4.A).
//!
//! `Row` is a small vector of `(column, Value)` pairs rather than a map: per
//! the teacher's own note (spec §9), this keeps column order cheap to
//! preserve and avoids hashing for the row sizes this engine deals with.

use chrono::{Datelike, DateTime, FixedOffset, Timelike};

use crate::error::{Error, Result};

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Number(f64),
    Date(DateTime<FixedOffset>),
}

/// An ordered, name-preserving record. Column names are unique per row.
pub type Row = Vec<(String, Value)>;

/// Ticks elapsed between `0001-01-01T00:00:00Z` and the Unix epoch, in the
/// .NET sense (100ns units) — used so `as_float` on a `Date` produces the
/// same "ticks as double" quantity the spec asks for.
const TICKS_AT_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

impl Value {
    /// `as_string` — spec §4.A.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => format_decimal(*n),
            Value::Date(d) => format_short_general(d),
            Value::Bool(b) => {
                if *b {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
        }
    }

    /// `as_float` — spec §4.A. Fails on a non-numeric string.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::type_error(format!("cannot parse {s:?} as a number"))),
            Value::Number(n) => Ok(*n),
            Value::Date(d) => Ok(date_to_ticks(d) as f64),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
        }
    }
}

pub fn date_to_ticks(d: &DateTime<FixedOffset>) -> i64 {
    let nanos = d.timestamp_nanos_opt().unwrap_or(0);
    TICKS_AT_UNIX_EPOCH + nanos / 100
}

fn format_decimal(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn format_short_general(d: &DateTime<FixedOffset>) -> String {
    let (hour12, is_pm) = {
        let h = d.hour();
        let pm = h >= 12;
        let h12 = match h % 12 {
            0 => 12,
            other => other,
        };
        (h12, pm)
    };
    format!(
        "{}/{}/{} {}:{:02} {}",
        d.month(),
        d.day(),
        d.year(),
        hour12,
        d.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// A single named, ordered record — re-exported helper for building rows
/// tersely in evaluator code and tests.
pub fn row_from(pairs: impl IntoIterator<Item = (impl Into<String>, Value)>) -> Row {
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Looks up a cell by column name.
pub fn get<'a>(row: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    row.iter().find(|(n, _)| n == name).map(|(_, v)| v)
}
