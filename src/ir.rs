//! The query AST — spec §3 `Query`/`Transformation` and friends.
//!
//! Derives `Serialize`/`Deserialize` throughout, the way the teacher's own
//! IR nodes do (`ir::rq::Transform` et al.) — useful for a host embedding
//! this engine to log or snapshot a parsed `Query` without a bespoke
//! pretty-printer.

use serde::{Deserialize, Serialize};

/// A fully parsed request: an ordered pipeline plus the action applied to
/// its result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    pub transformations: Vec<Transformation>,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    GetTheData,
    Metadata,
    GetSeries(String, String),
    GetRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagingOp {
    Take(usize),
    Skip(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationalOperator {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    InRange,
    Like,
}

/// One condition of a `FilterBy` — `(operator, field, literal)`.
pub type Condition = (RelationalOperator, String, String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupAggregation {
    GroupKey,
    CountAll,
    CountDistinct(String),
    ConcatValues(String),
    Sum(String),
    Mean(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowAggregation {
    Min(String),
    Max(String),
    Sum(String),
    Mean(String),
    FirstKey,
    LastKey,
    MiddleKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transformation {
    DropColumns(Vec<String>),
    SortBy(Vec<(String, SortDirection)>),
    GroupBy {
        keys: Vec<String>,
        aggs: Vec<GroupAggregation>,
    },
    WindowBy {
        key: String,
        size: usize,
        aggs: Vec<WindowAggregation>,
    },
    ExpandBy {
        key: String,
        aggs: Vec<WindowAggregation>,
    },
    FilterBy {
        op: BoolOp,
        conditions: Vec<Condition>,
    },
    Paging(Vec<PagingOp>),
    Empty,
}
