//! Module: db::read::iterate
//! Responsibility: drive one positioned cursor row by row, applying the
//! materializer and the optional filter.
//! Does not own: cursor creation or disposal; callers hand in a borrowed
//! cursor and keep whatever position iteration stops at.

use crate::{
    db::driver::Cursor,
    db::read::materialize::materialize,
    error::{ExecuteError, PersistenceError},
    filter::{ReadFilter, Verdict},
    mapping::Mapping,
    obs::sink::{self, MetricsEvent},
    record::Record,
};

/// Return the first accepted record, or `None` once the cursor is exhausted.
/// Exhaustion without a match is a normal result, not an error.
pub(crate) fn read_one(
    mapping: &Mapping,
    cursor: &mut dyn Cursor,
    mut filter: Option<&mut dyn ReadFilter>,
) -> Result<Option<Record>, PersistenceError> {
    let mut rows_scanned = 0u64;

    let result = loop {
        if !advance(mapping, cursor)? {
            break None;
        }
        rows_scanned += 1;

        let record = materialize(mapping, cursor)?;
        let verdict = evaluate(filter.as_deref_mut(), &record);

        if verdict.keep {
            break Some(record);
        }
        if !verdict.proceed {
            break None;
        }
    };

    sink::record(MetricsEvent::RowsScanned {
        entity: mapping.entity().to_string(),
        rows_scanned,
    });

    Ok(result)
}

/// Accumulate every accepted record in cursor order.
///
/// A stop verdict terminates consumption immediately; records accepted up to
/// that point are retained. An empty result is a normal outcome. Any
/// materialization failure aborts the iteration and discards partial
/// results.
pub(crate) fn read_all(
    mapping: &Mapping,
    cursor: &mut dyn Cursor,
    mut filter: Option<&mut dyn ReadFilter>,
) -> Result<Vec<Record>, PersistenceError> {
    let mut records = Vec::new();
    let mut rows_scanned = 0u64;

    loop {
        if !advance(mapping, cursor)? {
            break;
        }
        rows_scanned += 1;

        let record = materialize(mapping, cursor)?;
        let verdict = evaluate(filter.as_deref_mut(), &record);

        if verdict.keep {
            records.push(record);
        }
        if !verdict.proceed {
            break;
        }
    }

    sink::record(MetricsEvent::RowsScanned {
        entity: mapping.entity().to_string(),
        rows_scanned,
    });

    Ok(records)
}

fn advance(mapping: &Mapping, cursor: &mut dyn Cursor) -> Result<bool, PersistenceError> {
    cursor.advance().map_err(|source| {
        PersistenceError::execute(mapping.entity(), None, ExecuteError::Advance(source))
    })
}

fn evaluate(filter: Option<&mut (dyn ReadFilter + '_)>, record: &Record) -> Verdict {
    filter.map_or(Verdict::ACCEPT, |f| f.evaluate(record))
}
