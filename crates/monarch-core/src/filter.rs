use crate::record::Record;

///
/// Verdict
///
/// Per-candidate decision carrying two independent signals: whether to keep
/// the record and whether to keep scanning. Keeping them separate removes
/// the ambiguity around the row that triggers a stop: an accept-and-stop
/// verdict retains it, a reject-and-stop verdict drops it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Verdict {
    pub keep: bool,
    pub proceed: bool,
}

impl Verdict {
    pub const ACCEPT: Self = Self {
        keep: true,
        proceed: true,
    };
    pub const REJECT: Self = Self {
        keep: false,
        proceed: true,
    };
    pub const ACCEPT_STOP: Self = Self {
        keep: true,
        proceed: false,
    };
    pub const REJECT_STOP: Self = Self {
        keep: false,
        proceed: false,
    };
}

///
/// ReadFilter
///
/// Caller-supplied row filter, invoked once per materialized record in
/// cursor order. A stop verdict is irreversible for that iteration: no
/// further rows are consumed once signaled, even if more remain.
///

pub trait ReadFilter {
    fn evaluate(&mut self, candidate: &Record) -> Verdict;
}

impl<F> ReadFilter for F
where
    F: FnMut(&Record) -> Verdict,
{
    fn evaluate(&mut self, candidate: &Record) -> Verdict {
        self(candidate)
    }
}
