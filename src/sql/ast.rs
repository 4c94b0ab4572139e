//! The internal SQL relational IR — spec §3, §4.F.
//!
//! Named and shaped after the teacher's own internal `sql::pq::ast` stage:
//! a dedicated, narrow relational IR distinct from (and much smaller than)
//! a general-purpose `sqlparser` AST, since this translator targets exactly
//! one dialect and one fixed statement shape.

use serde::{Deserialize, Serialize};

use crate::ir::SortDirection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlSource {
    Table(String),
    Nested(Box<SqlQuery>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlSelect {
    Literal(String),
    Column(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagingSpec {
    pub skip: f64,
    pub take: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
    /// Wrap the column reference in `CAST(… AS nvarchar(1000))` — needed
    /// when the underlying metadata type is `String`/`Any` (spec §4.F rule 2).
    pub cast_to_nvarchar: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlQuery {
    pub source: SqlSource,
    pub select: Vec<SqlSelect>,
    pub paging: Option<PagingSpec>,
    pub order_by: Option<Vec<OrderBy>>,
}

impl SqlQuery {
    /// The initial query before any transformation is folded in — spec §4.F.
    pub fn initial(table: impl Into<String>, columns: &[String]) -> Self {
        SqlQuery {
            source: SqlSource::Table(table.into()),
            select: columns.iter().cloned().map(SqlSelect::Column).collect(),
            paging: None,
            order_by: None,
        }
    }

    /// Wraps `self` as a `Nested` source of a fresh query selecting every
    /// column `self` selected, as plain columns.
    pub fn into_nested(self) -> SqlQuery {
        let columns: Vec<SqlSelect> = self
            .select
            .iter()
            .map(|s| match s {
                SqlSelect::Column(c) => SqlSelect::Column(c.clone()),
                SqlSelect::Literal(l) => SqlSelect::Column(alias_of(l)),
            })
            .collect();
        SqlQuery {
            source: SqlSource::Nested(Box::new(self)),
            select: columns,
            paging: None,
            order_by: None,
        }
    }
}

/// Extracts the alias out of a literal select like `"0 as [temp_sort]"`,
/// so a subsequent nesting can reference it as a plain column.
fn alias_of(literal: &str) -> String {
    literal
        .rsplit('[')
        .next()
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(literal)
        .to_string()
}
