//! Textual rendering of the internal SQL AST — `format_sql_query` (spec §4.F).

use crate::error::{Error, Result};
use crate::ir::SortDirection;

use super::ast::{OrderBy, SqlQuery, SqlSelect, SqlSource};

pub fn format_sql_query(query: &SqlQuery) -> Result<String> {
    let select = query
        .select
        .iter()
        .map(render_select)
        .collect::<Result<Vec<_>>>()?
        .join(", ");

    let from = render_source(&query.source)?;

    let mut sql = format!("SELECT {select} FROM {from}");

    if let Some(order_by) = &query.order_by {
        let rendered = order_by
            .iter()
            .map(render_order_by)
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        sql.push_str(&format!(" ORDER BY {rendered}"));
    }

    if let Some(paging) = &query.paging {
        sql.push_str(&format!(" OFFSET {} ROWS", paging.skip));
        if paging.take.is_finite() {
            sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", paging.take));
        }
    }

    Ok(sql)
}

fn render_select(select: &SqlSelect) -> Result<String> {
    match select {
        SqlSelect::Literal(lit) => Ok(lit.clone()),
        SqlSelect::Column(name) => format_name(name),
    }
}

fn render_source(source: &SqlSource) -> Result<String> {
    match source {
        SqlSource::Table(name) => format_name(name),
        SqlSource::Nested(q) => Ok(format!("({}) t", format_sql_query(q)?)),
    }
}

fn render_order_by(order: &OrderBy) -> Result<String> {
    let col = format_name(&order.column)?;
    let col = if order.cast_to_nvarchar {
        format!("CAST({col} AS nvarchar(1000))")
    } else {
        col
    };
    let dir = match order.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    Ok(format!("{col} {dir}"))
}

/// Bracket-wraps an identifier after an allow-list check — spec §4.F,
/// invariant 9: only `[A-Za-z0-9._-]` may appear.
pub fn format_name(name: &str) -> Result<String> {
    if name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        && !name.is_empty()
    {
        Ok(format!("[{name}]"))
    } else {
        Err(Error::invalid_identifier(name.to_string()))
    }
}
