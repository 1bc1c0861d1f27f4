//! Runtime value type for fields, arguments and return values.

use std::fmt;

use crate::runtime::ObjectHandle;

/// A dynamic value held in a property slot or passed through a call.
///
/// Values are untyped from the model's point of view: any slot accepts any
/// variant. Object values are handles into the runtime's `ObjectHeap`, so
/// cloning a `Value::Object` copies the reference, not the instance.
#[derive(Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value (`null`)
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value (owned)
    String(String),
    /// Handle to a heap-allocated instance
    Object(ObjectHandle),
}

impl Value {
    /// Get a human-readable name for this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Object(_) => "object",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the object handle, if this is an object.
    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Value::Object(h) => Some(*h),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Object(h) => write!(f, "Object({:?})", h),
        }
    }
}

/// String conversion as used by `echo`: `null` and `false` print nothing,
/// `true` prints `1`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => write!(f, "1"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
            Value::Object(h) => write!(f, "Object#{}", h.index),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<ObjectHandle> for Value {
    fn from(h: ObjectHandle) -> Self {
        Value::Object(h)
    }
}
