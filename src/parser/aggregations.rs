//! Generic aggregation-token parser, parameterized by a nullary and a unary
//! table (spec §4.C): "try exact-match nullary first; else for each unary
//! prefix, if the token starts with it, take the remainder after the prefix
//! plus one separator character and apply `trim_ident`".

use super::chunks::trim_ident;
use crate::error::{Error, Result};
use crate::ir::{GroupAggregation, WindowAggregation};

pub fn parse_group_agg(token: &str) -> Result<GroupAggregation> {
    if token == "group-key" {
        return Ok(GroupAggregation::GroupKey);
    }
    if token == "count-all" {
        return Ok(GroupAggregation::CountAll);
    }
    const UNARY_PREFIXES: &[&str] = &["count-distinct", "concat-values", "sum", "mean"];
    for prefix in UNARY_PREFIXES {
        if let Some(field) = strip_unary_prefix(token, prefix) {
            return Ok(match *prefix {
                "count-distinct" => GroupAggregation::CountDistinct(field),
                "concat-values" => GroupAggregation::ConcatValues(field),
                "sum" => GroupAggregation::Sum(field),
                "mean" => GroupAggregation::Mean(field),
                _ => unreachable!(),
            });
        }
    }
    Err(Error::parse(format!(
        "unknown group aggregation token {token:?}"
    )))
}

pub fn parse_window_agg(token: &str) -> Result<WindowAggregation> {
    if token == "first-key" {
        return Ok(WindowAggregation::FirstKey);
    }
    if token == "last-key" {
        return Ok(WindowAggregation::LastKey);
    }
    if token == "middle-key" {
        return Ok(WindowAggregation::MiddleKey);
    }
    const UNARY_PREFIXES: &[&str] = &["min", "max", "sum", "mean"];
    for prefix in UNARY_PREFIXES {
        if let Some(field) = strip_unary_prefix(token, prefix) {
            return Ok(match *prefix {
                "min" => WindowAggregation::Min(field),
                "max" => WindowAggregation::Max(field),
                "sum" => WindowAggregation::Sum(field),
                "mean" => WindowAggregation::Mean(field),
                _ => unreachable!(),
            });
        }
    }
    Err(Error::parse(format!(
        "unknown window aggregation token {token:?}"
    )))
}

/// If `token` starts with `prefix` followed by at least one more character
/// (the separator), returns `trim_ident` of everything after that separator.
fn strip_unary_prefix(token: &str, prefix: &str) -> Option<String> {
    if token.starts_with(prefix) && token.len() > prefix.len() {
        Some(trim_ident(&token[prefix.len() + 1..]))
    } else {
        None
    }
}
