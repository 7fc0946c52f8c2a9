//! Tree values: the closed set of node shapes a document can hold

use std::fmt;

use super::{Array, Object};

/// A document value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Object(Object),
    Array(Array),
    Scalar(Scalar),
}

impl Value {
    /// Get the kind of this value for diagnostics
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::Scalar(scalar) => scalar.value_kind(),
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

/// Kind of a value, as named in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Lexical class of a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Number,
    Bool,
    Null,
}

/// A leaf value kept as its source text
///
/// Numbers and strings re-emit exactly as written (`1.50` stays `1.50`,
/// escapes are not normalised).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    raw: String,
    kind: ScalarKind,
}

impl Scalar {
    /// Build from already-validated source text
    pub(crate) fn from_raw(kind: ScalarKind, raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind,
        }
    }

    /// A string scalar holding `text`
    pub fn string(text: &str) -> Self {
        Self::from_raw(ScalarKind::String, quote(text))
    }

    pub fn bool(value: bool) -> Self {
        Self::from_raw(ScalarKind::Bool, if value { "true" } else { "false" })
    }

    pub fn null() -> Self {
        Self::from_raw(ScalarKind::Null, "null")
    }

    pub fn number(value: i64) -> Self {
        Self::from_raw(ScalarKind::Number, value.to_string())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Decoded contents of a string scalar
    pub fn as_str(&self) -> Option<String> {
        match self.kind {
            ScalarKind::String => serde_json::from_str::<String>(&self.raw).ok(),
            _ => None,
        }
    }

    fn value_kind(&self) -> ValueKind {
        match self.kind {
            ScalarKind::String => ValueKind::String,
            ScalarKind::Number => ValueKind::Number,
            ScalarKind::Bool => ValueKind::Boolean,
            ScalarKind::Null => ValueKind::Null,
        }
    }
}

/// Encode text as a JSON string literal
pub(crate) fn quote(text: &str) -> String {
    // Serializing a &str cannot fail
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}
