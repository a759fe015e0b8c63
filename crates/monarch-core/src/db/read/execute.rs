//! Module: db::read::execute
//! Responsibility: turn any read source into a positioned cursor and scope
//! the handles created along the way.
//! Boundary: the ownership rule lives here — every handle this module
//! creates is dropped on every exit path (RAII), and every handle passed in
//! arrives as a borrow that is never dropped or closed.

use crate::{
    db::driver::{Connection, Cursor, PreparedStatement, Statement},
    db::read::bind,
    error::{ExecuteError, PersistenceError},
    mapping::Mapping,
    value::Value,
};

///
/// ReadSource
///
/// The closed set of entry shapes a read can start from. Caller-owned
/// handles are carried as mutable borrows; the engine opens and closes
/// anything further it needs (statements, cursors) per call.
///

pub enum ReadSource<'a> {
    /// An already-executed cursor, positioned before the next row to read.
    Cursor(&'a mut dyn Cursor),

    /// A reusable statement handle plus free-form SQL.
    Statement {
        statement: &'a mut dyn Statement,
        sql: &'a str,
    },

    /// A connection plus free-form SQL; statement and cursor are created
    /// internally and closed before returning.
    Connection {
        connection: &'a mut dyn Connection,
        sql: &'a str,
    },

    /// A prepared statement with all parameters already bound.
    Prepared(&'a mut dyn PreparedStatement),

    /// SQL with an ordered parameter collection, bound positionally in
    /// iteration order into an internally prepared statement.
    SqlWithParams {
        connection: &'a mut dyn Connection,
        sql: &'a str,
        params: Vec<Value>,
    },

    /// SQL with an indexed parameter array; `params[0]` binds first.
    SqlWithParamSlice {
        connection: &'a mut dyn Connection,
        sql: &'a str,
        params: &'a [Value],
    },
}

/// Produce a positioned cursor for the source and hand it to `consume`.
///
/// Handles created here live exactly as long as `consume` runs and are
/// dropped on success and failure alike; borrowed handles are left open at
/// whatever position consumption stopped.
pub(crate) fn with_cursor<T>(
    mapping: &Mapping,
    source: ReadSource<'_>,
    consume: impl FnOnce(&mut dyn Cursor) -> Result<T, PersistenceError>,
) -> Result<T, PersistenceError> {
    match source {
        ReadSource::Cursor(cursor) => consume(cursor),

        ReadSource::Statement { statement, sql } => {
            let mut cursor = statement
                .execute_query(sql)
                .map_err(|e| execute_error(mapping, Some(sql), ExecuteError::Execute(e)))?;

            consume(cursor.as_mut())
        }

        ReadSource::Connection { connection, sql } => {
            let mut statement = connection
                .create_statement()
                .map_err(|e| execute_error(mapping, Some(sql), ExecuteError::Prepare(e)))?;
            let mut cursor = statement
                .execute_query(sql)
                .map_err(|e| execute_error(mapping, Some(sql), ExecuteError::Execute(e)))?;

            consume(cursor.as_mut())
        }

        ReadSource::Prepared(statement) => {
            let mut cursor = statement
                .execute_query()
                .map_err(|e| execute_error(mapping, None, ExecuteError::Execute(e)))?;

            consume(cursor.as_mut())
        }

        ReadSource::SqlWithParams {
            connection,
            sql,
            params,
        } => with_bound_statement(
            mapping,
            connection,
            sql,
            |statement| bind::bind_params(mapping, sql, &params, statement),
            consume,
        ),

        ReadSource::SqlWithParamSlice {
            connection,
            sql,
            params,
        } => with_bound_statement(
            mapping,
            connection,
            sql,
            |statement| bind::bind_params(mapping, sql, params, statement),
            consume,
        ),
    }
}

/// Prepare a statement on the caller's connection, run the supplied binder,
/// execute, and hand the cursor to `consume`. The statement and cursor are
/// scoped to this call.
pub(crate) fn with_bound_statement<T>(
    mapping: &Mapping,
    connection: &mut dyn Connection,
    sql: &str,
    bind: impl FnOnce(&mut dyn PreparedStatement) -> Result<(), PersistenceError>,
    consume: impl FnOnce(&mut dyn Cursor) -> Result<T, PersistenceError>,
) -> Result<T, PersistenceError> {
    let mut statement = connection
        .prepare(sql)
        .map_err(|e| execute_error(mapping, Some(sql), ExecuteError::Prepare(e)))?;

    bind(statement.as_mut())?;

    let mut cursor = statement
        .execute_query()
        .map_err(|e| execute_error(mapping, Some(sql), ExecuteError::Execute(e)))?;

    consume(cursor.as_mut())
}

fn execute_error(mapping: &Mapping, sql: Option<&str>, err: ExecuteError) -> PersistenceError {
    PersistenceError::execute(mapping.entity(), sql, err)
}
