//! Metrics sink boundary.
//!
//! Read-path logic MUST NOT depend on any concrete metrics backend.
//! All instrumentation flows through MetricsEvent and MetricsSink; this
//! module is the only bridge between execution logic and whatever sink
//! the embedding application installs.

use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// ReadKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadKind {
    One,
    List,
}

///
/// MetricsEvent
///

#[derive(Clone, Debug)]
pub enum MetricsEvent {
    ReadStart {
        kind: ReadKind,
        entity: String,
    },
    RowsScanned {
        entity: String,
        rows_scanned: u64,
    },
    ReadFinish {
        kind: ReadKind,
        entity: String,
        rows_returned: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: &MetricsEvent);
}

/// Install a sink for the current thread. Replaces any previous sink.
pub fn set_sink(sink: Rc<dyn MetricsSink>) {
    SINK.with(|slot| *slot.borrow_mut() = Some(sink));
}

/// Remove the current thread's sink, returning to the silent default.
pub fn reset_sink() {
    SINK.with(|slot| *slot.borrow_mut() = None);
}

/// Emit one event into the installed sink, if any.
pub(crate) fn record(event: MetricsEvent) {
    SINK.with(|slot| {
        if let Some(sink) = slot.borrow().as_ref() {
            sink.record(&event);
        }
    });
}
