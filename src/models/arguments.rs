use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque broker arguments (`x-message-ttl`, `alternate-exchange`, ...).
///
/// Keys keep their insertion order for output; equality compares contents only.
pub type Arguments = IndexMap<String, ArgumentValue>;

/// A single argument payload. Closed over the shapes broker argument tables use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Null,
    Bool(bool),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f64),
    String(String),
    List(Vec<ArgumentValue>),
    Table(Arguments),
}

impl ArgumentValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgumentValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgumentValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ArgumentValue::Integer(n) => u64::try_from(*n).ok(),
            ArgumentValue::UnsignedInteger(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgumentValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgumentValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Bool(value)
    }
}

impl From<i32> for ArgumentValue {
    fn from(value: i32) -> Self {
        ArgumentValue::Integer(value.into())
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        ArgumentValue::Integer(value)
    }
}

impl From<u64> for ArgumentValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => ArgumentValue::Integer(n),
            Err(_) => ArgumentValue::UnsignedInteger(value),
        }
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        ArgumentValue::Float(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::String(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::String(value)
    }
}

impl From<Vec<ArgumentValue>> for ArgumentValue {
    fn from(value: Vec<ArgumentValue>) -> Self {
        ArgumentValue::List(value)
    }
}

impl From<Arguments> for ArgumentValue {
    fn from(value: Arguments) -> Self {
        ArgumentValue::Table(value)
    }
}

/// Routing key of a binding. Management exports carry either a string or a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoutingKey {
    Text(String),
    Number(i64),
}

impl Default for RoutingKey {
    fn default() -> Self {
        RoutingKey::Text(String::new())
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingKey::Text(key) => f.write_str(key),
            RoutingKey::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RoutingKey {
    fn from(value: &str) -> Self {
        RoutingKey::Text(value.to_string())
    }
}

impl From<String> for RoutingKey {
    fn from(value: String) -> Self {
        RoutingKey::Text(value)
    }
}

impl From<i64> for RoutingKey {
    fn from(value: i64) -> Self {
        RoutingKey::Number(value)
    }
}
