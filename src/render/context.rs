//! Explicit variable context for template rendering.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A value that can be referenced from a template expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A text value.
    Str(String),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
}

impl Value {
    /// Returns the value's type name, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }

    /// Returns the value as a string slice, or `None` if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64`, or `None` for non-numbers.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Variable bindings for a render call.
///
/// Expressions resolve bare identifiers against this mapping and nothing
/// else; there is no fallback to ambient state.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Variable values keyed by name.
    values: HashMap<String, Value>,
}

impl RenderContext {
    /// Creates a new empty render context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, replacing any previous binding of the name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Gets a value from the context.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Gets a string value from the context.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Checks if the context contains a binding for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of bindings in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the context has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut ctx = RenderContext::new();
        ctx.set("name", "Alice");
        ctx.set("count", 42);

        assert_eq!(ctx.get_str("name"), Some("Alice"));
        assert_eq!(ctx.get("count"), Some(&Value::Int(42)));
        assert!(ctx.get("missing").is_none());
    }

    #[test]
    fn test_set_replaces_previous_binding() {
        let mut ctx = RenderContext::new();
        ctx.set("x", 1);
        ctx.set("x", "two");
        assert_eq!(ctx.get_str("x"), Some("two"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_len_and_contains() {
        let mut ctx = RenderContext::new();
        assert!(ctx.is_empty());

        ctx.set("a", 1);
        ctx.set("b", 2.5);

        assert!(!ctx.is_empty());
        assert_eq!(ctx.len(), 2);
        assert!(ctx.contains("a"));
        assert!(!ctx.contains("c"));
    }

    #[test]
    fn test_from_iterator() {
        let ctx: RenderContext = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(ctx.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_value_display_forms() {
        assert_eq!(Value::Str("plain".to_string()).to_string(), "plain");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::from(1).type_name(), "integer");
        assert_eq!(Value::from(1.0).type_name(), "float");
        assert_eq!(Value::from(false).type_name(), "boolean");
    }

    #[test]
    fn test_value_serde_is_untagged() {
        let json = serde_json::to_string(&Value::Int(3)).unwrap();
        assert_eq!(json, "3");

        let back: Value = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(back, Value::Str("text".to_string()));

        let num: Value = serde_json::from_str("2.25").unwrap();
        assert_eq!(num, Value::Float(2.25));
    }
}
