use crate::{
    db::driver::Cursor,
    error::{MaterializeError, PersistenceError},
    mapping::Mapping,
    record::Record,
};

/// Materialize the cursor's current row into one fresh record.
///
/// Per field mapping: read the column by name, run the coercion registered
/// for the declared type, and append the result in field order. Never moves
/// the cursor.
pub(crate) fn materialize(mapping: &Mapping, cursor: &dyn Cursor) -> Result<Record, PersistenceError> {
    let mut record = Record::with_capacity(mapping.fields().len());

    for field in mapping.fields() {
        let raw = cursor.column(field.column()).map_err(|source| {
            PersistenceError::materialize(
                mapping.entity(),
                MaterializeError::Column {
                    column: field.column().to_string(),
                    source,
                },
            )
        })?;

        let raw = raw.ok_or_else(|| {
            PersistenceError::materialize(
                mapping.entity(),
                MaterializeError::MissingColumn {
                    column: field.column().to_string(),
                },
            )
        })?;

        let value = field.coerce(raw).map_err(|source| {
            PersistenceError::materialize(
                mapping.entity(),
                MaterializeError::Coerce {
                    field: field.field().to_string(),
                    source,
                },
            )
        })?;

        record.push(field.field(), value);
    }

    Ok(record)
}
