
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// KeyValue
///
/// Ordered tuple of scalar values identifying one row. Single-column keys
/// carry one value; compound keys carry one value per primary-key field in
/// the mapping's fixed field order. The binder enforces that the tuple arity
/// matches the consuming mapping's primary-key arity.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct KeyValue(Vec<Value>);

impl KeyValue {
    pub fn single(value: impl Into<Value>) -> Self {
        Self(vec![value.into()])
    }

    pub fn compound(values: impl IntoIterator<Item = Value>) -> Self {
        Self(values.into_iter().collect())
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

impl From<Value> for KeyValue {
    fn from(value: Value) -> Self {
        Self::single(value)
    }
}

impl From<i64> for KeyValue {
    fn from(int: i64) -> Self {
        Self::single(int)
    }
}

impl From<i32> for KeyValue {
    fn from(int: i32) -> Self {
        Self::single(int)
    }
}

impl From<&str> for KeyValue {
    fn from(text: &str) -> Self {
        Self::single(text)
    }
}

impl From<String> for KeyValue {
    fn from(text: String) -> Self {
        Self::single(text)
    }
}
