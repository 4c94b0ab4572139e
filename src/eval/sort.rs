//! `SortBy` — spec §4.D.
//!
//! The first declared `(field, direction)` pair is the primary key (§9:
//! the "reverse the list" framing in the source is equivalent to plain
//! lexicographic order over the declared order, so we don't reverse
//! anything here).

use std::cell::RefCell;
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::ir::SortDirection;
use crate::value::{get, Row, Value};

pub fn apply(rows: Vec<Row>, keys: &[(String, SortDirection)]) -> Result<Vec<Row>> {
    if keys.is_empty() {
        return Ok(rows);
    }

    let mut rows = rows;
    let error: RefCell<Option<Error>> = RefCell::new(None);

    rows.sort_by(|a, b| {
        if error.borrow().is_some() {
            return Ordering::Equal;
        }
        for (field, dir) in keys {
            match compare_field(a, b, field) {
                Ok(Ordering::Equal) => continue,
                Ok(ord) => {
                    return if *dir == SortDirection::Descending {
                        ord.reverse()
                    } else {
                        ord
                    };
                }
                Err(e) => {
                    *error.borrow_mut() = Some(e);
                    return Ordering::Equal;
                }
            }
        }
        Ordering::Equal
    });

    match error.into_inner() {
        Some(e) => Err(e),
        None => Ok(rows),
    }
}

fn compare_field(a: &Row, b: &Row, field: &str) -> Result<Ordering> {
    let av = get(a, field).ok_or_else(|| Error::data(format!("missing column {field:?}")))?;
    let bv = get(b, field).ok_or_else(|| Error::data(format!("missing column {field:?}")))?;
    compare_values(av, bv)
}

fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            Ok(x.partial_cmp(y).unwrap_or(Ordering::Equal))
        }
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        _ => Err(Error::type_error(format!(
            "cannot compare {} with {} while sorting",
            a.type_name(),
            b.type_name()
        ))),
    }
}
