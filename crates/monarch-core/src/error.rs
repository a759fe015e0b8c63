use crate::{db::driver::DriverError, value::CoerceError};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// PersistenceError
///
/// Structured read-path error with a stable origin classification. The one
/// error type surfaced to callers; the structured detail identifies the
/// failing stage, and `entity`/`sql` carry enough context to diagnose a
/// failure without defensive boilerplate at the call site.
///
/// "No object found" is never an error; errors are reserved for contract
/// violations and execution failures.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct PersistenceError {
    pub origin: ErrorOrigin,
    pub entity: String,
    pub sql: Option<String>,
    pub message: String,
    pub detail: ErrorDetail,
}

impl PersistenceError {
    fn new(origin: ErrorOrigin, entity: &str, sql: Option<&str>, detail: ErrorDetail) -> Self {
        Self {
            origin,
            entity: entity.to_string(),
            sql: sql.map(ToString::to_string),
            message: detail.to_string(),
            detail,
        }
    }

    /// Construct a materialization-stage error.
    pub(crate) fn materialize(entity: &str, err: MaterializeError) -> Self {
        Self::new(
            ErrorOrigin::Materialize,
            entity,
            None,
            ErrorDetail::Materialize(err),
        )
    }

    /// Construct an execution-stage error.
    pub(crate) fn execute(entity: &str, sql: Option<&str>, err: ExecuteError) -> Self {
        Self::new(ErrorOrigin::Execute, entity, sql, ErrorDetail::Execute(err))
    }

    /// Construct a parameter-binding error.
    pub(crate) fn bind(entity: &str, sql: Option<&str>, err: BindError) -> Self {
        Self::new(ErrorOrigin::Bind, entity, sql, ErrorDetail::Bind(err))
    }

    /// Construct a mapping-contract violation.
    pub(crate) fn mapping(entity: &str, err: MappingError) -> Self {
        Self::new(ErrorOrigin::Mapping, entity, None, ErrorDetail::Mapping(err))
    }

    #[must_use]
    pub const fn is_materialize(&self) -> bool {
        matches!(self.origin, ErrorOrigin::Materialize)
    }

    #[must_use]
    pub const fn is_execute(&self) -> bool {
        matches!(self.origin, ErrorOrigin::Execute)
    }

    #[must_use]
    pub const fn is_bind(&self) -> bool {
        matches!(self.origin, ErrorOrigin::Bind)
    }

    #[must_use]
    pub fn display_with_origin(&self) -> String {
        format!("{}: {} (entity '{}')", self.origin, self.message, self.entity)
    }
}

///
/// ErrorOrigin
/// Stage taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorOrigin {
    #[display("materialize")]
    Materialize,
    #[display("execute")]
    Execute,
    #[display("bind")]
    Bind,
    #[display("mapping")]
    Mapping,
}

///
/// ErrorDetail
///
/// Structured, stage-specific error detail carried by [`PersistenceError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Materialize(MaterializeError),
    #[error("{0}")]
    Execute(ExecuteError),
    #[error("{0}")]
    Bind(BindError),
    #[error("{0}")]
    Mapping(MappingError),
}

///
/// MaterializeError
///
/// Row-to-record failures: a declared column absent from the row's column
/// set, or a column value the declared field type cannot represent.
///

#[derive(Debug, ThisError)]
pub enum MaterializeError {
    #[error("column '{column}' missing from result row")]
    MissingColumn { column: String },

    #[error("field '{field}': {source}")]
    Coerce { field: String, source: CoerceError },

    #[error("column '{column}' read failed: {source}")]
    Column { column: String, source: DriverError },
}

///
/// ExecuteError
///
/// Query execution and cursor failures surfaced by the underlying driver.
/// No retries happen at this layer; transient connectivity issues are the
/// connection pool's concern.
///

#[derive(Debug, ThisError)]
pub enum ExecuteError {
    #[error("statement preparation failed: {0}")]
    Prepare(#[source] DriverError),

    #[error("query execution failed: {0}")]
    Execute(#[source] DriverError),

    #[error("cursor advance failed: {0}")]
    Advance(#[source] DriverError),
}

///
/// BindError
///
/// Positional-parameter contract violations.
///

#[derive(Debug, ThisError)]
pub enum BindError {
    #[error("key {position} has arity {found}, primary key expects {expected}")]
    KeyArity {
        position: usize,
        expected: usize,
        found: usize,
    },

    #[error("empty key collection reached the binder")]
    EmptyKeys,

    #[error("dialect does not support IN clauses")]
    InClauseUnsupported,

    #[error("IN clause of {parameters} parameters exceeds dialect limit {limit}")]
    InClauseOverflow { parameters: usize, limit: usize },

    #[error("bind of parameter {index} failed: {source}")]
    Bind { index: usize, source: DriverError },
}

///
/// MappingError
///
/// Mapping-contract violations caught at build or key-extraction time.
///

#[derive(Debug, ThisError)]
pub enum MappingError {
    #[error("mapping declares no fields")]
    NoFields,

    #[error("duplicate field '{name}'")]
    DuplicateField { name: String },

    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    #[error("mapping declares no primary key fields")]
    EmptyPrimaryKey,

    #[error("primary key names unknown field '{name}'")]
    UnknownPrimaryKeyField { name: String },

    #[error("candidate record is missing key field '{name}'")]
    MissingKeyField { name: String },
}
