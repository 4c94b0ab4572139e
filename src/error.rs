//! Error type for the engine.
//!
//! Shaped after the teacher's own `Error { span, reason, help }` (see
//! `prql-compiler/src/error.rs`), minus the source span: this engine has no
//! multi-line source document to point into, only a single DSL string.

use std::fmt::{self, Display, Formatter};

/// The single error type returned by every fallible function in this crate.
#[derive(Debug, Clone)]
pub struct Error {
    pub reason: Reason,
    pub help: Option<String>,
}

/// Error kinds named in spec §7.
#[derive(Debug, Clone)]
pub enum Reason {
    /// Malformed DSL, unknown op, unparseable condition, invalid column name.
    ParseError(String),
    /// Comparison of incompatible values; condition operator illegal for a cell's type.
    TypeError(String),
    /// CSV empty, column-value type mismatch during materialization.
    DataError(String),
    /// Unexpected null in a non-string SQL column.
    NullError { column: String },
    /// SQL formatter rejected a column/table name.
    InvalidIdentifier(String),
}

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error {
            reason: Reason::ParseError(msg.into()),
            help: None,
        }
    }

    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        Error {
            reason: Reason::TypeError(msg.into()),
            help: None,
        }
    }

    pub fn data<S: Into<String>>(msg: S) -> Self {
        Error {
            reason: Reason::DataError(msg.into()),
            help: None,
        }
    }

    pub fn null_in(column: impl Into<String>) -> Self {
        Error {
            reason: Reason::NullError {
                column: column.into(),
            },
            help: None,
        }
    }

    pub fn invalid_identifier<S: Into<String>>(msg: S) -> Self {
        Error {
            reason: Reason::InvalidIdentifier(msg.into()),
            help: None,
        }
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Reason::ParseError(m) => write!(f, "parse error: {m}"),
            Reason::TypeError(m) => write!(f, "type error: {m}"),
            Reason::DataError(m) => write!(f, "data error: {m}"),
            Reason::NullError { column } => {
                write!(f, "unexpected null in non-string column `{column}`")
            }
            Reason::InvalidIdentifier(name) => {
                write!(f, "Invalid column or table name: {name:?}")
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if let Some(help) = &self.help {
            write!(f, " (hint: {help})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = core::result::Result<T, E>;
