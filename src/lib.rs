//! `pivotql` — a tabular pivot/query engine.
//!
//! Parses a compact, `$`-chunked transformation DSL into a typed query AST
//! and executes it either in-memory over a row set, or by translating a
//! subset of the query into paging-aware SQL and reading results back into
//! typed values.
//!
//! ```text
//!               ┌──────────┐      ┌───────────┐
//!   DSL string ─▶│  parser  │─────▶│  Query IR │
//!               └──────────┘      └─────┬─────┘
//!                                        │
//!                       ┌────────────────┴────────────────┐
//!                       ▼                                 ▼
//!                 ┌───────────┐                     ┌────────────┐
//!                 │ evaluator │                     │ translator │
//!                 │ (in-mem)  │                     │   (SQL)    │
//!                 └─────┬─────┘                     └──────┬─────┘
//!                       │                                   │
//!                       └────────────────┬──────────────────┘
//!                                        ▼
//!                                 ┌─────────────┐
//!                                 │  dispatcher │ ── action + preview
//!                                 └──────┬──────┘
//!                                        ▼
//!                                 ┌─────────────┐
//!                                 │  serializer │ ── JSON
//!                                 └─────────────┘
//! ```

pub mod collaborators;
pub mod dispatch;
pub mod error;
pub mod eval;
pub mod ir;
pub mod parser;
pub mod serialize;
pub mod sql;
pub mod types;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use dispatch::Dispatcher;
pub use error::{Error, Reason, Result};
pub use ir::{Action, Query, Transformation};
pub use value::{Row, Value};
