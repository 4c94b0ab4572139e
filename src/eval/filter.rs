//! `FilterBy` and the type-directed `eval_condition` — spec §4.D.

use crate::error::{Error, Result};
use crate::ir::{BoolOp, Condition, RelationalOperator};
use crate::types::parse_instant;
use crate::value::{get, Row, Value};

pub fn apply(rows: Vec<Row>, op: BoolOp, conditions: &[Condition]) -> Result<Vec<Row>> {
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if satisfies(&row, op, conditions)? {
            kept.push(row);
        }
    }
    Ok(kept)
}

fn satisfies(row: &Row, op: BoolOp, conditions: &[Condition]) -> Result<bool> {
    if conditions.is_empty() {
        return Ok(true);
    }
    match op {
        BoolOp::And => {
            for c in conditions {
                if !eval_one(row, c)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        BoolOp::Or => {
            for c in conditions {
                if eval_one(row, c)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn eval_one(row: &Row, (op, field, literal): &Condition) -> Result<bool> {
    let value = get(row, field).ok_or_else(|| Error::data(format!("missing column {field:?}")))?;
    eval_condition(*op, value, literal)
}

/// Type-directed condition evaluation — spec §4.D.
pub fn eval_condition(op: RelationalOperator, value: &Value, literal: &str) -> Result<bool> {
    use RelationalOperator::*;
    match value {
        Value::String(s) => match op {
            Like => Ok(s.to_lowercase().contains(&literal.to_lowercase())),
            Equals => Ok(s == literal),
            NotEquals => Ok(s != literal),
            _ => Err(illegal(op, "string")),
        },
        Value::Bool(b) => match op {
            Equals => Ok(*b == parse_bool_literal(literal)?),
            NotEquals => Ok(*b != parse_bool_literal(literal)?),
            _ => Err(illegal(op, "bool")),
        },
        Value::Number(n) => match op {
            GreaterThan => Ok(*n > parse_f64(literal)?),
            LessThan => Ok(*n < parse_f64(literal)?),
            InRange => {
                let (lo, hi) = parse_pair_f64(literal)?;
                Ok(*n >= lo && *n <= hi)
            }
            _ => Err(illegal(op, "number")),
        },
        Value::Date(d) => match op {
            Like => Err(illegal(op, "date")),
            InRange => {
                let (lo, hi) = parse_pair_instants(literal)?;
                Ok(*d >= lo && *d <= hi)
            }
            Equals => Ok(*d == parse_instant_literal(literal)?),
            NotEquals => Ok(*d != parse_instant_literal(literal)?),
            LessThan => Ok(*d < parse_instant_literal(literal)?),
            GreaterThan => Ok(*d > parse_instant_literal(literal)?),
        },
    }
}

fn illegal(op: RelationalOperator, type_name: &str) -> Error {
    Error::type_error(format!("operator {op:?} is not valid on a {type_name} column"))
}

fn parse_bool_literal(s: &str) -> Result<bool> {
    if s.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if s.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::type_error(format!("{s:?} is not a boolean literal")))
    }
}

fn parse_f64(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| Error::type_error(format!("{s:?} is not a numeric literal")))
}

fn parse_pair_f64(s: &str) -> Result<(f64, f64)> {
    let (lo, hi) = split_pair(s)?;
    Ok((parse_f64(lo)?, parse_f64(hi)?))
}

fn parse_instant_literal(s: &str) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    parse_instant(s.trim()).ok_or_else(|| Error::type_error(format!("{s:?} is not a date literal")))
}

fn parse_pair_instants(s: &str) -> Result<(chrono::DateTime<chrono::FixedOffset>, chrono::DateTime<chrono::FixedOffset>)> {
    let (lo, hi) = split_pair(s)?;
    Ok((parse_instant_literal(lo)?, parse_instant_literal(hi)?))
}

fn split_pair(s: &str) -> Result<(&str, &str)> {
    s.split_once(',')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| Error::parse(format!("expected \"lo,hi\", got {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_is_case_insensitive_substring() {
        assert!(eval_condition(
            RelationalOperator::Like,
            &Value::String("Jonathan".to_string()),
            "an"
        )
        .unwrap());
    }

    #[test]
    fn equals_number_is_illegal() {
        assert!(eval_condition(RelationalOperator::Equals, &Value::Number(1.0), "1").is_err());
    }

    #[test]
    fn in_range_number_is_inclusive() {
        assert!(eval_condition(RelationalOperator::InRange, &Value::Number(18.0), "18,30").unwrap());
        assert!(!eval_condition(RelationalOperator::InRange, &Value::Number(31.0), "18,30").unwrap());
    }

    #[test]
    fn bool_equals_is_case_insensitive() {
        assert!(eval_condition(RelationalOperator::Equals, &Value::Bool(true), "TRUE").unwrap());
    }

    #[test]
    fn s2_or_is_union_and_is_intersection() {
        let rows = vec![
            crate::value::row_from(vec![
                ("age", Value::Number(20.0)),
                ("name", Value::String("anna".to_string())),
            ]),
            crate::value::row_from(vec![
                ("age", Value::Number(5.0)),
                ("name", Value::String("anna".to_string())),
            ]),
            crate::value::row_from(vec![
                ("age", Value::Number(20.0)),
                ("name", Value::String("bob".to_string())),
            ]),
        ];
        let conditions = vec![
            (RelationalOperator::GreaterThan, "age".to_string(), "18".to_string()),
            (RelationalOperator::Like, "name".to_string(), "an".to_string()),
        ];
        let or_result = apply(rows.clone(), BoolOp::Or, &conditions).unwrap();
        assert_eq!(or_result.len(), 3);
        let and_result = apply(rows, BoolOp::And, &conditions).unwrap();
        assert_eq!(and_result.len(), 1);
    }
}
