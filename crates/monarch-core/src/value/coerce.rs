//! Module: value::coerce
//! Responsibility: declared field types and their value-coercion functions.
//! Does not own: row access, mapping validation, or record assembly.
//! Boundary: coercers are selected once at mapping construction; the hot
//! materialization path invokes them without any runtime type inspection.

use crate::value::Value;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Largest integer magnitude representable in an f64 without precision loss.
const F64_SAFE_U64: u64 = 1u64 << 53;

///
/// FieldType
///
/// Declared type of one mapped field. Each variant selects a concrete
/// coercion function when the mapping is built.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Text,
    Bytes,
}

/// Coercion function registered per field at mapping construction time.
pub type CoerceFn = fn(Value) -> Result<Value, CoerceError>;

impl FieldType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Bytes => "bytes",
        }
    }

    /// Resolve the coercion function for this declared type.
    #[must_use]
    pub const fn coercer(self) -> CoerceFn {
        match self {
            Self::Bool => coerce_bool,
            Self::Int => coerce_int,
            Self::Float => coerce_float,
            Self::Text => coerce_text,
            Self::Bytes => coerce_bytes,
        }
    }
}

///
/// CoerceError
///
/// A column value that cannot be represented in the declared field type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("cannot coerce {found} value {value} into {expected} field")]
pub struct CoerceError {
    pub expected: &'static str,
    pub found: &'static str,
    pub value: String,
}

impl CoerceError {
    fn new(expected: FieldType, value: &Value) -> Self {
        Self {
            expected: expected.name(),
            found: value.type_name(),
            value: value.to_string(),
        }
    }
}

/// Null passes through every declared type; absent values stay absent.
fn coerce_bool(value: Value) -> Result<Value, CoerceError> {
    match value {
        Value::Null | Value::Bool(_) => Ok(value),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        other => Err(CoerceError::new(FieldType::Bool, &other)),
    }
}

fn coerce_int(value: Value) -> Result<Value, CoerceError> {
    match value {
        Value::Null | Value::Int(_) => Ok(value),
        Value::Float(float) if float.fract() == 0.0 => float
            .to_i64()
            .map(Value::Int)
            .ok_or_else(|| CoerceError::new(FieldType::Int, &Value::Float(float))),
        Value::Text(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| CoerceError::new(FieldType::Int, &Value::Text(text))),
        other => Err(CoerceError::new(FieldType::Int, &other)),
    }
}

fn coerce_float(value: Value) -> Result<Value, CoerceError> {
    match value {
        Value::Null | Value::Float(_) => Ok(value),
        // Reject integers an f64 would silently round.
        Value::Int(int) if int.unsigned_abs() <= F64_SAFE_U64 => int
            .to_f64()
            .map(Value::Float)
            .ok_or_else(|| CoerceError::new(FieldType::Float, &Value::Int(int))),
        Value::Text(text) => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoerceError::new(FieldType::Float, &Value::Text(text))),
        other => Err(CoerceError::new(FieldType::Float, &other)),
    }
}

fn coerce_text(value: Value) -> Result<Value, CoerceError> {
    match value {
        Value::Null | Value::Text(_) => Ok(value),
        Value::Int(int) => Ok(Value::Text(int.to_string())),
        Value::Float(float) => Ok(Value::Text(float.to_string())),
        other => Err(CoerceError::new(FieldType::Text, &other)),
    }
}

fn coerce_bytes(value: Value) -> Result<Value, CoerceError> {
    match value {
        Value::Null | Value::Bytes(_) => Ok(value),
        other => Err(CoerceError::new(FieldType::Bytes, &other)),
    }
}
