use crate::{
    db::driver::PreparedStatement,
    error::{BindError, PersistenceError},
    key::KeyValue,
    mapping::Mapping,
    value::Value,
};

/// Bind a collection of primary keys positionally into a prepared statement.
///
/// Each key contributes `primary_key_arity` parameters in the mapping's
/// fixed field order; keys concatenate in collection order, so a consuming
/// `IN (...)` clause sees `arity × keys` placeholders. Indices are 1-based.
///
/// The facade short-circuits empty key collections before any statement is
/// prepared; an empty collection here is a contract violation.
pub(crate) fn bind_keys(
    mapping: &Mapping,
    sql: &str,
    keys: &[KeyValue],
    statement: &mut dyn PreparedStatement,
) -> Result<(), PersistenceError> {
    if keys.is_empty() {
        return Err(PersistenceError::bind(
            mapping.entity(),
            Some(sql),
            BindError::EmptyKeys,
        ));
    }

    let arity = mapping.primary_key_arity();
    let mut index = 1usize;

    for (position, key) in keys.iter().enumerate() {
        if key.arity() != arity {
            return Err(PersistenceError::bind(
                mapping.entity(),
                Some(sql),
                BindError::KeyArity {
                    position,
                    expected: arity,
                    found: key.arity(),
                },
            ));
        }

        for value in key.values() {
            bind_at(mapping, sql, statement, index, value.clone())?;
            index += 1;
        }
    }

    Ok(())
}

/// Bind free-form query parameters positionally, in iteration order.
pub(crate) fn bind_params(
    mapping: &Mapping,
    sql: &str,
    params: &[Value],
    statement: &mut dyn PreparedStatement,
) -> Result<(), PersistenceError> {
    for (offset, value) in params.iter().enumerate() {
        bind_at(mapping, sql, statement, offset + 1, value.clone())?;
    }

    Ok(())
}

fn bind_at(
    mapping: &Mapping,
    sql: &str,
    statement: &mut dyn PreparedStatement,
    index: usize,
    value: Value,
) -> Result<(), PersistenceError> {
    statement.bind(index, value).map_err(|source| {
        PersistenceError::bind(
            mapping.entity(),
            Some(sql),
            BindError::Bind { index, source },
        )
    })
}
