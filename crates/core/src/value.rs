//! Raw value model for the EAV store
//!
//! This module defines `RawValue`, the unified representation of data
//! crossing the store boundary: request bodies after JSON parsing, default
//! values on attributes, and the output of `get_value`. The typed storage
//! inside the engine is a separate tagged payload; `RawValue` is only the
//! wire-side shape.
//!
//! ## Type rules
//!
//! - Seven types: Null, Bool, Int, Float, String, Array, Object
//! - No implicit coercions at this layer; coercion rules live in the
//!   value engine, driven by the attribute's declared type
//! - `Int(1) != Float(1.0)`: different types are never equal
//! - Float equality is IEEE-754: `NaN != NaN`, `-0.0 == 0.0`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unified raw value for all store boundaries
///
/// JSON maps onto this model exactly; `From` conversions to and from
/// `serde_json::Value` are provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(Vec<RawValue>),
    /// Object with string keys
    Object(HashMap<String, RawValue>),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for RawValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RawValue::Null, RawValue::Null) => true,
            (RawValue::Bool(a), RawValue::Bool(b)) => a == b,
            (RawValue::Int(a), RawValue::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (RawValue::Float(a), RawValue::Float(b)) => a == b,
            (RawValue::String(a), RawValue::String(b)) => a == b,
            (RawValue::Array(a), RawValue::Array(b)) => a == b,
            (RawValue::Object(a), RawValue::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            // Different types are never equal
            _ => false,
        }
    }
}

impl RawValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Int(_) => "integer",
            RawValue::Float(_) => "number",
            RawValue::String(_) => "string",
            RawValue::Array(_) => "array",
            RawValue::Object(_) => "object",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, RawValue::String(_))
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, RawValue::Array(_))
    }

    /// Check if this is an object value
    pub fn is_object(&self) -> bool {
        matches!(self, RawValue::Object(_))
    }

    /// Emptiness as the value engine sees it: null, empty string or empty
    /// array
    ///
    /// Date and datetime attributes treat all of these as "clear the slot"
    /// rather than as a parseable value.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::String(s) => s.is_empty(),
            RawValue::Array(a) => a.is_empty(),
            _ => false,
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RawValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[RawValue] if this is an Array value
    pub fn as_array(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &HashMap if this is an Object value
    pub fn as_object(&self) -> Option<&HashMap<String, RawValue>> {
        match self {
            RawValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Int(i)
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        RawValue::Int(i as i64)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(a: Vec<RawValue>) -> Self {
        RawValue::Array(a)
    }
}

impl From<HashMap<String, RawValue>> for RawValue {
    fn from(o: HashMap<String, RawValue>) -> Self {
        RawValue::Object(o)
    }
}

impl From<()> for RawValue {
    fn from(_: ()) -> Self {
        RawValue::Null
    }
}

// ============================================================================
// serde_json interop
// ============================================================================

impl From<serde_json::Value> for RawValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else {
                    // u64 beyond i64 range falls back to float
                    RawValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => RawValue::String(s),
            serde_json::Value::Array(arr) => {
                RawValue::Array(arr.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(obj) => RawValue::Object(
                obj.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect(),
            ),
        }
    }
}

impl From<RawValue> for serde_json::Value {
    fn from(v: RawValue) -> Self {
        match v {
            RawValue::Null => serde_json::Value::Null,
            RawValue::Bool(b) => serde_json::Value::Bool(b),
            RawValue::Int(i) => serde_json::Value::Number(i.into()),
            RawValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            RawValue::String(s) => serde_json::Value::String(s),
            RawValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            RawValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
