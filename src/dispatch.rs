//! The dispatcher — spec §4.G: selects the in-memory or SQL backend,
//! applies preview truncation, and projects the final action.

use serde_json::Value as Json;

use crate::collaborators::{SqlReader, SqlReaderDyn};
use crate::error::Result;
use crate::ir::{Action, PagingOp, Query, Transformation};
use crate::parser;
use crate::types::Metadata;
use crate::value::Row;
use crate::{eval, serialize, sql};

struct SqlBackend {
    reader: Box<dyn SqlReaderDyn>,
    table: String,
    connection_string: String,
}

/// Holds a materialized in-memory row set plus, optionally, a SQL backend
/// to translate paging/sorting queries against instead.
pub struct Dispatcher {
    metadata: Metadata,
    rows: Vec<Row>,
    sql: Option<SqlBackend>,
}

impl Dispatcher {
    pub fn new(metadata: Metadata, rows: Vec<Row>) -> Self {
        Dispatcher {
            metadata,
            rows,
            sql: None,
        }
    }

    /// Attaches a SQL backend: queries that would otherwise run in-memory
    /// are instead translated (§4.F) and run against `table` over
    /// `connection_string`.
    pub fn with_sql_backend(
        mut self,
        reader: impl SqlReader + 'static,
        table: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        self.sql = Some(SqlBackend {
            reader: Box::new(reader),
            table: table.into(),
            connection_string: connection_string.into(),
        });
        self
    }

    /// Parses `query_string`, partitions `flags` for `"preview"`, and
    /// evaluates against whichever backend is configured.
    pub fn dispatch(&self, query_string: &str, flags: &[String]) -> Result<Json> {
        let is_preview = flags.iter().any(|f| f == "preview");
        let query = parser::parse(query_string)?;

        match &self.sql {
            Some(backend) => self.dispatch_sql(backend, &query, is_preview),
            None => self.dispatch_memory(&query, is_preview),
        }
    }

    fn dispatch_memory(&self, query: &Query, is_preview: bool) -> Result<Json> {
        let rows = eval::evaluate(self.rows.clone(), &query.transformations)?;
        let rows = if is_preview {
            eval::preview_truncate(rows)
        } else {
            rows
        };
        Ok(serialize::apply_action(&rows, &self.metadata, &query.action))
    }

    /// `Metadata` is answered in-memory without a SQL call. `GetSeries` and
    /// `GetRange` are not currently supported on the SQL path and return an
    /// empty array — a known limitation (spec §9), not a guess at the
    /// intended semantics.
    fn dispatch_sql(&self, backend: &SqlBackend, query: &Query, is_preview: bool) -> Result<Json> {
        if let Action::Metadata = &query.action {
            return Ok(serialize::metadata(&self.metadata));
        }

        let mut transformations = query.transformations.clone();
        if is_preview {
            transformations.push(Transformation::Paging(vec![PagingOp::Take(10)]));
        }

        let sql_query = sql::translate(&transformations, &self.metadata, &backend.table);
        let sql_text = sql::format_sql_query(&sql_query)?;
        let rows = backend
            .reader
            .read_rows(&backend.connection_string, &sql_text, &self.metadata)?;

        match &query.action {
            Action::GetTheData => Ok(serialize::records(&rows)),
            Action::Metadata => unreachable!("handled above"),
            Action::GetSeries(_, _) | Action::GetRange(_) => Ok(Json::Array(Vec::new())),
        }
    }
}
