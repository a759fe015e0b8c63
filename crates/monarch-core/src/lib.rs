//! Core runtime for Monarch: the mapping contract, row materialization,
//! cursor iteration, and the object reader facade exported via the
//! `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod filter;
pub mod key;
pub mod mapping;
pub mod obs;
pub mod record;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or driver traits are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::database::Database,
        db::read::{ObjectReader, ReadSource},
        filter::{ReadFilter, Verdict},
        key::KeyValue,
        mapping::Mapping,
        record::Record,
        value::{FieldType, Value},
    };
}
