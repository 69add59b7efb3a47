//! Inspectable values handed to representation lookups.
//!
//! [`Value`] is the object model reps are matched against: plain JSON data,
//! boxed string objects, callables and the undefined value. Each value maps
//! to a coarse [`ValueType`] tag used as the second argument of
//! [`crate::registry::Rep::supports_object`].

use std::fmt;

use serde::Serialize;

/// Coarse type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// No value.
    Undefined,
    /// Null, arrays, maps.
    Object,
    /// `true` / `false`.
    Boolean,
    /// Any number.
    Number,
    /// Strings, including boxed string objects.
    String,
    /// Callables.
    Function,
}

impl ValueType {
    /// Lowercase tag name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that can be displayed through a rep.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The undefined value.
    Undefined,
    /// Plain data.
    Json(serde_json::Value),
    /// A string wrapped in an object.
    StringObject(String),
    /// A callable, identified by name.
    Function {
        /// Function name, empty for anonymous callables.
        name: String,
    },
}

impl Value {
    /// Returns the coarse type tag. String wrapper objects report
    /// [`ValueType::String`].
    #[must_use]
    pub const fn type_of(&self) -> ValueType {
        match self {
            Self::Undefined => ValueType::Undefined,
            Self::Json(serde_json::Value::Bool(_)) => ValueType::Boolean,
            Self::Json(serde_json::Value::Number(_)) => ValueType::Number,
            Self::Json(serde_json::Value::String(_)) | Self::StringObject(_) => ValueType::String,
            Self::Json(_) => ValueType::Object,
            Self::Function { .. } => ValueType::Function,
        }
    }

    /// `true` for undefined and null.
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Json(serde_json::Value::Null))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Json(serde_json::Value::String(value.to_string()))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Json(serde_json::Value::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_wrappers_are_strings() {
        assert_eq!(Value::from("x").type_of(), ValueType::String);
        assert_eq!(
            Value::StringObject("x".to_string()).type_of(),
            ValueType::String
        );
    }

    #[test]
    fn null_is_an_object() {
        assert_eq!(Value::Json(serde_json::Value::Null).type_of(), ValueType::Object);
        assert!(Value::Json(serde_json::Value::Null).is_nullish());
    }

    #[test]
    fn scalar_tags() {
        assert_eq!(Value::from(42).type_of(), ValueType::Number);
        assert_eq!(Value::Json(serde_json::json!(true)).type_of(), ValueType::Boolean);
        assert_eq!(Value::Json(serde_json::json!([1, 2])).type_of(), ValueType::Object);
        assert_eq!(Value::Undefined.type_of().as_str(), "undefined");
        assert_eq!(
            Value::Function {
                name: "onLoad".to_string()
            }
            .type_of(),
            ValueType::Function
        );
    }
}
