//! Chunk → `Transformation` mapping table (spec §4.C).

use super::aggregations::{parse_group_agg, parse_window_agg};
use super::chunks::trim_ident;
use super::conditions::parse_condition;
use crate::error::{Error, Result};
use crate::ir::{BoolOp, PagingOp, SortDirection, Transformation};

pub fn parse_drop(args: &[&str]) -> Result<Transformation> {
    Ok(Transformation::DropColumns(
        args.iter().map(|a| trim_ident(a)).collect(),
    ))
}

pub fn parse_sort(args: &[&str]) -> Result<Transformation> {
    let cols = args.iter().map(|a| parse_sort_token(a)).collect();
    Ok(Transformation::SortBy(cols))
}

fn parse_sort_token(tok: &str) -> (String, SortDirection) {
    if let Some(stripped) = tok.strip_suffix(" desc") {
        (trim_ident(stripped), SortDirection::Descending)
    } else if let Some(stripped) = tok.strip_suffix(" asc") {
        (trim_ident(stripped), SortDirection::Ascending)
    } else {
        (trim_ident(tok), SortDirection::Ascending)
    }
}

pub fn parse_filter(args: &[&str]) -> Result<Transformation> {
    if args.is_empty() {
        return Ok(Transformation::FilterBy {
            op: BoolOp::And,
            conditions: Vec::new(),
        });
    }
    let first = trim_ident(args[0]);
    let (op, rest) = if first.eq_ignore_ascii_case("and") {
        (BoolOp::And, &args[1..])
    } else if first.eq_ignore_ascii_case("or") {
        (BoolOp::Or, &args[1..])
    } else {
        (BoolOp::And, args)
    };
    let conditions = rest
        .iter()
        .map(|c| parse_condition(c))
        .collect::<Result<Vec<_>>>()?;
    Ok(Transformation::FilterBy { op, conditions })
}

pub fn parse_groupby(args: &[&str]) -> Result<Transformation> {
    let mut idx = 0;
    let mut keys = Vec::new();
    while idx < args.len() {
        match args[idx].strip_prefix("by ") {
            Some(rest) => {
                keys.push(trim_ident(rest));
                idx += 1;
            }
            None => break,
        }
    }
    let aggs = args[idx..]
        .iter()
        .map(|t| parse_group_agg(t))
        .collect::<Result<Vec<_>>>()?;
    Ok(Transformation::GroupBy { keys, aggs })
}

pub fn parse_windowby(args: &[&str]) -> Result<Transformation> {
    let mut it = args.iter();
    let key = parse_by_key(it.next())?;
    let size_tok = it
        .next()
        .ok_or_else(|| Error::parse("windowby requires a window size argument"))?;
    let size: usize = size_tok
        .trim()
        .parse()
        .map_err(|_| Error::parse(format!("invalid window size {size_tok:?}")))?;
    let aggs = it
        .map(|t| parse_window_agg(t))
        .collect::<Result<Vec<_>>>()?;
    Ok(Transformation::WindowBy { key, size, aggs })
}

pub fn parse_expandby(args: &[&str]) -> Result<Transformation> {
    let mut it = args.iter();
    let key = parse_by_key(it.next())?;
    let aggs = it
        .map(|t| parse_window_agg(t))
        .collect::<Result<Vec<_>>>()?;
    Ok(Transformation::ExpandBy { key, aggs })
}

fn parse_by_key(tok: Option<&&str>) -> Result<String> {
    let tok = tok.ok_or_else(|| Error::parse("expected a `by <key>` argument"))?;
    tok.strip_prefix("by ")
        .map(trim_ident)
        .ok_or_else(|| Error::parse(format!("expected `by <key>`, got {tok:?}")))
}

pub fn parse_take(args: &[&str]) -> Result<Transformation> {
    Ok(Transformation::Paging(vec![PagingOp::Take(parse_usize_arg(
        args, "take",
    )?)]))
}

pub fn parse_skip(args: &[&str]) -> Result<Transformation> {
    Ok(Transformation::Paging(vec![PagingOp::Skip(parse_usize_arg(
        args, "skip",
    )?)]))
}

fn parse_usize_arg(args: &[&str], op: &str) -> Result<usize> {
    let tok = args
        .first()
        .ok_or_else(|| Error::parse(format!("{op} requires a single numeric argument")))?;
    tok.trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(format!("invalid {op} argument {tok:?}")))
}
