mod coerce;


use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

// re-exports
pub use coerce::{CoerceError, CoerceFn, FieldType};

///
/// Value
///
/// Dynamic scalar carried between driver rows and record fields. This is the
/// only representation that crosses the driver boundary; field declarations
/// narrow it via the coercion registered on the mapping.
///

#[derive(Clone, Debug, Deserialize, Display, From, PartialEq, Serialize)]
pub enum Value {
    #[display("null")]
    Null,
    #[display("{_0}")]
    Bool(bool),
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Float(f64),
    #[display("'{_0}'")]
    Text(String),
    #[display("<{} bytes>", _0.len())]
    Bytes(Vec<u8>),
}

impl Value {
    /// Stable type label used in diagnostics and coercion errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i32> for Value {
    fn from(int: i32) -> Self {
        Self::Int(i64::from(int))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
