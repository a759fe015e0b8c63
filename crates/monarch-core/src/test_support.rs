//! In-memory driver for read-path tests.
//!
//! Serves fixture rows and keeps open/close accounting so ownership tests
//! can assert that the engine drops exactly the handles it created, on
//! success and failure alike.

use crate::{
    db::driver::{Connection, Cursor, DriverError, PreparedStatement, Statement},
    mapping::Mapping,
    obs::sink::{MetricsEvent, MetricsSink},
    value::{FieldType, Value},
};
use std::{cell::RefCell, rc::Rc};

pub(crate) type Row = Vec<(&'static str, Value)>;

///
/// DriverLog
///

#[derive(Debug, Default)]
pub(crate) struct DriverLog {
    pub statements_opened: usize,
    pub statements_closed: usize,
    pub cursors_opened: usize,
    pub cursors_closed: usize,
    pub queries_executed: usize,
    /// Every positional bind, in call order.
    pub bound: Vec<(usize, Value)>,
}

impl DriverLog {
    pub fn all_handles_closed(&self) -> bool {
        self.statements_opened == self.statements_closed
            && self.cursors_opened == self.cursors_closed
    }
}

///
/// MemConnection
///

pub(crate) struct MemConnection {
    rows: Vec<Row>,
    fail_execute: bool,
    log: Rc<RefCell<DriverLog>>,
}

impl MemConnection {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            fail_execute: false,
            log: Rc::default(),
        }
    }

    /// A connection whose statements fail at execution time.
    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail_execute: true,
            log: Rc::default(),
        }
    }

    pub fn log(&self) -> Rc<RefCell<DriverLog>> {
        Rc::clone(&self.log)
    }
}

impl Connection for MemConnection {
    fn create_statement(&mut self) -> Result<Box<dyn Statement + '_>, DriverError> {
        self.log.borrow_mut().statements_opened += 1;
        Ok(Box::new(MemStatement {
            rows: self.rows.clone(),
            fail_execute: self.fail_execute,
            log: Rc::clone(&self.log),
        }))
    }

    fn prepare(&mut self, _sql: &str) -> Result<Box<dyn PreparedStatement + '_>, DriverError> {
        self.log.borrow_mut().statements_opened += 1;
        Ok(Box::new(MemPrepared {
            rows: self.rows.clone(),
            fail_execute: self.fail_execute,
            log: Rc::clone(&self.log),
        }))
    }
}

///
/// MemStatement
///

pub(crate) struct MemStatement {
    rows: Vec<Row>,
    fail_execute: bool,
    log: Rc<RefCell<DriverLog>>,
}

impl Statement for MemStatement {
    fn execute_query(&mut self, _sql: &str) -> Result<Box<dyn Cursor + '_>, DriverError> {
        if self.fail_execute {
            return Err(DriverError::new("injected execute failure"));
        }
        self.log.borrow_mut().queries_executed += 1;
        Ok(Box::new(MemCursor::tracked(
            self.rows.clone(),
            Rc::clone(&self.log),
        )))
    }
}

impl Drop for MemStatement {
    fn drop(&mut self) {
        self.log.borrow_mut().statements_closed += 1;
    }
}

///
/// MemPrepared
///

pub(crate) struct MemPrepared {
    rows: Vec<Row>,
    fail_execute: bool,
    log: Rc<RefCell<DriverLog>>,
}

impl PreparedStatement for MemPrepared {
    fn bind(&mut self, index: usize, value: Value) -> Result<(), DriverError> {
        self.log.borrow_mut().bound.push((index, value));
        Ok(())
    }

    fn execute_query(&mut self) -> Result<Box<dyn Cursor + '_>, DriverError> {
        if self.fail_execute {
            return Err(DriverError::new("injected execute failure"));
        }
        self.log.borrow_mut().queries_executed += 1;
        Ok(Box::new(MemCursor::tracked(
            self.rows.clone(),
            Rc::clone(&self.log),
        )))
    }
}

impl Drop for MemPrepared {
    fn drop(&mut self) {
        self.log.borrow_mut().statements_closed += 1;
    }
}

///
/// MemCursor
///

pub(crate) struct MemCursor {
    rows: Vec<Row>,
    current: Option<usize>,
    next: usize,
    log: Option<Rc<RefCell<DriverLog>>>,
}

impl MemCursor {
    /// A caller-owned cursor outside any connection accounting.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            current: None,
            next: 0,
            log: None,
        }
    }

    fn tracked(rows: Vec<Row>, log: Rc<RefCell<DriverLog>>) -> Self {
        log.borrow_mut().cursors_opened += 1;
        Self {
            rows,
            current: None,
            next: 0,
            log: Some(log),
        }
    }
}

impl Cursor for MemCursor {
    fn advance(&mut self) -> Result<bool, DriverError> {
        if self.next < self.rows.len() {
            self.current = Some(self.next);
            self.next += 1;
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    fn column(&self, name: &str) -> Result<Option<Value>, DriverError> {
        let row = self
            .current
            .map(|index| &self.rows[index])
            .ok_or_else(|| DriverError::new("cursor is not positioned on a row"))?;

        Ok(row
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value.clone()))
    }
}

impl Drop for MemCursor {
    fn drop(&mut self) {
        if let Some(log) = &self.log {
            log.borrow_mut().cursors_closed += 1;
        }
    }
}

///
/// RecordingSink
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: &MetricsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

///
/// Fixtures
///

/// `person(id int pk, name text)` — the canonical two-column mapping.
pub(crate) fn person_mapping() -> Mapping {
    Mapping::builder("person")
        .field("id", "id", FieldType::Int)
        .field("name", "name", FieldType::Text)
        .primary_key(&["id"])
        .build()
        .unwrap()
}

pub(crate) fn person_rows() -> Vec<Row> {
    vec![
        vec![("id", Value::Int(1)), ("name", Value::Text("a".into()))],
        vec![("id", Value::Int(2)), ("name", Value::Text("b".into()))],
        vec![("id", Value::Int(3)), ("name", Value::Text("c".into()))],
    ]
}
