//! Module: db::driver
//! Responsibility: the trait boundary over caller-supplied database handles.
//! Does not own: SQL text generation, materialization, or ownership policy.
//! Boundary: implemented by concrete drivers; consumed by the read path.
//! Handles are released by dropping them; the read path drops exactly the
//! handles it created and never the ones it borrowed.

use crate::value::Value;
use std::error::Error;
use thiserror::Error as ThisError;

///
/// DriverError
///
/// Failure reported by a concrete driver, wrapping its native error.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct DriverError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

///
/// Cursor
///
/// Forward-only positioned sequence of result rows. A fresh cursor is
/// positioned before the first row; `advance` moves to the next row and
/// reports whether one exists. Column reads address the current row only.
///

pub trait Cursor {
    /// Advance to the next row. `false` means the cursor is exhausted.
    fn advance(&mut self) -> Result<bool, DriverError>;

    /// Read a column of the current row by name. `None` means the column is
    /// absent from the row's column set (as opposed to a null value).
    fn column(&self, name: &str) -> Result<Option<Value>, DriverError>;
}

///
/// Statement
///
/// Reusable handle executing arbitrary SQL text.
///

pub trait Statement {
    fn execute_query(&mut self, sql: &str) -> Result<Box<dyn Cursor + '_>, DriverError>;
}

///
/// PreparedStatement
///
/// Parameterized handle bound to one SQL string at preparation time.
///

pub trait PreparedStatement {
    /// Bind one positional parameter. Indices are 1-based.
    fn bind(&mut self, index: usize, value: Value) -> Result<(), DriverError>;

    fn execute_query(&mut self) -> Result<Box<dyn Cursor + '_>, DriverError>;
}

///
/// Connection
///
/// Open database connection able to produce statement handles. The read
/// path never closes a connection; that responsibility stays with whoever
/// opened it.
///

pub trait Connection {
    fn create_statement(&mut self) -> Result<Box<dyn Statement + '_>, DriverError>;

    fn prepare(&mut self, sql: &str) -> Result<Box<dyn PreparedStatement + '_>, DriverError>;
}
