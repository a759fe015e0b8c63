use crate::{
    db::database::{Database, SqlFeature},
    db::driver::Connection,
    db::read::{bind, execute, iterate, ReadSource},
    error::{BindError, PersistenceError},
    filter::ReadFilter,
    key::KeyValue,
    mapping::Mapping,
    obs::sink::{self, MetricsEvent, ReadKind},
    record::Record,
};

///
/// ObjectReader
///
/// The read-path facade. Pure dispatch: each entry point resolves its
/// source shape, funnels through the execution adapter into the one cursor
/// iteration engine, and maps an absent result to `None` or an empty list.
/// Holds only the dialect descriptor; every call is independent and
/// stateless.
///

pub struct ObjectReader {
    database: Database,
}

impl ObjectReader {
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Read the first record the source produces, if any.
    pub fn read(
        &self,
        mapping: &Mapping,
        source: ReadSource<'_>,
    ) -> Result<Option<Record>, PersistenceError> {
        self.read_inner(mapping, source, None)
    }

    /// Read the first record the filter accepts, if any.
    pub fn read_with_filter(
        &self,
        mapping: &Mapping,
        source: ReadSource<'_>,
        filter: &mut dyn ReadFilter,
    ) -> Result<Option<Record>, PersistenceError> {
        self.read_inner(mapping, source, Some(filter))
    }

    /// Read every record the source produces, in cursor order.
    pub fn read_list(
        &self,
        mapping: &Mapping,
        source: ReadSource<'_>,
    ) -> Result<Vec<Record>, PersistenceError> {
        self.read_list_inner(mapping, source, None)
    }

    /// Read every record the filter accepts, in cursor order.
    pub fn read_list_with_filter(
        &self,
        mapping: &Mapping,
        source: ReadSource<'_>,
        filter: &mut dyn ReadFilter,
    ) -> Result<Vec<Record>, PersistenceError> {
        self.read_list_inner(mapping, source, Some(filter))
    }

    /// Read one record by primary key. Works for single-column and compound
    /// keys; the SQL must use the equality form with one `?` per primary-key
    /// field in mapping order.
    ///
    /// An absent key is a normal result (`None`), never an error.
    pub fn read_by_primary_key(
        &self,
        mapping: &Mapping,
        key: impl Into<KeyValue>,
        sql: &str,
        connection: &mut dyn Connection,
    ) -> Result<Option<Record>, PersistenceError> {
        let key = key.into();
        sink::record(start(ReadKind::One, mapping));

        let result = execute::with_bound_statement(
            mapping,
            connection,
            sql,
            |statement| bind::bind_keys(mapping, sql, std::slice::from_ref(&key), statement),
            |cursor| iterate::read_one(mapping, cursor, None),
        )?;

        sink::record(finish(ReadKind::One, mapping, u64::from(result.is_some())));
        Ok(result)
    }

    /// Read the records matching a collection of primary keys, using the
    /// `IN (...)` SQL form with `arity × keys` placeholders.
    ///
    /// An empty key collection short-circuits to an empty list without
    /// touching the connection (an empty `IN ()` clause is invalid SQL).
    pub fn read_list_by_primary_keys(
        &self,
        mapping: &Mapping,
        keys: &[KeyValue],
        sql: &str,
        connection: &mut dyn Connection,
    ) -> Result<Vec<Record>, PersistenceError> {
        self.read_list_by_primary_keys_inner(mapping, keys, sql, connection, None)
    }

    /// Filtered variant of [`Self::read_list_by_primary_keys`].
    pub fn read_list_by_primary_keys_with_filter(
        &self,
        mapping: &Mapping,
        keys: &[KeyValue],
        sql: &str,
        connection: &mut dyn Connection,
        filter: &mut dyn ReadFilter,
    ) -> Result<Vec<Record>, PersistenceError> {
        self.read_list_by_primary_keys_inner(mapping, keys, sql, connection, Some(filter))
    }

    fn read_inner(
        &self,
        mapping: &Mapping,
        source: ReadSource<'_>,
        filter: Option<&mut dyn ReadFilter>,
    ) -> Result<Option<Record>, PersistenceError> {
        sink::record(start(ReadKind::One, mapping));

        let result = execute::with_cursor(mapping, source, |cursor| {
            iterate::read_one(mapping, cursor, filter)
        })?;

        sink::record(finish(ReadKind::One, mapping, u64::from(result.is_some())));
        Ok(result)
    }

    fn read_list_inner(
        &self,
        mapping: &Mapping,
        source: ReadSource<'_>,
        filter: Option<&mut dyn ReadFilter>,
    ) -> Result<Vec<Record>, PersistenceError> {
        sink::record(start(ReadKind::List, mapping));

        let records = execute::with_cursor(mapping, source, |cursor| {
            iterate::read_all(mapping, cursor, filter)
        })?;

        sink::record(finish(ReadKind::List, mapping, records.len() as u64));
        Ok(records)
    }

    fn read_list_by_primary_keys_inner(
        &self,
        mapping: &Mapping,
        keys: &[KeyValue],
        sql: &str,
        connection: &mut dyn Connection,
        filter: Option<&mut dyn ReadFilter>,
    ) -> Result<Vec<Record>, PersistenceError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.check_in_clause(mapping, keys, sql)?;

        sink::record(start(ReadKind::List, mapping));

        let records = execute::with_bound_statement(
            mapping,
            connection,
            sql,
            |statement| bind::bind_keys(mapping, sql, keys, statement),
            |cursor| iterate::read_all(mapping, cursor, filter),
        )?;

        sink::record(finish(ReadKind::List, mapping, records.len() as u64));
        Ok(records)
    }

    /// Dialect gate for the batch-key clause shape.
    fn check_in_clause(
        &self,
        mapping: &Mapping,
        keys: &[KeyValue],
        sql: &str,
    ) -> Result<(), PersistenceError> {
        if !self.database.supports(SqlFeature::InClause) {
            return Err(PersistenceError::bind(
                mapping.entity(),
                Some(sql),
                BindError::InClauseUnsupported,
            ));
        }

        let parameters = keys.len() * mapping.primary_key_arity();
        if let Some(limit) = self.database.max_in_parameters() {
            if parameters > limit {
                return Err(PersistenceError::bind(
                    mapping.entity(),
                    Some(sql),
                    BindError::InClauseOverflow { parameters, limit },
                ));
            }
        }

        Ok(())
    }
}

fn start(kind: ReadKind, mapping: &Mapping) -> MetricsEvent {
    MetricsEvent::ReadStart {
        kind,
        entity: mapping.entity().to_string(),
    }
}

fn finish(kind: ReadKind, mapping: &Mapping, rows_returned: u64) -> MetricsEvent {
    MetricsEvent::ReadFinish {
        kind,
        entity: mapping.entity().to_string(),
        rows_returned,
    }
}
