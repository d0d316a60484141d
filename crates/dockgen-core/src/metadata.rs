use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value as it appears in declaration metadata or endpoint
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Literal>),
    Record(BTreeMap<String, Literal>),
}

impl Literal {
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "boolean",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Str(_) => "string",
            Literal::Array(_) => "array",
            Literal::Record(_) => "record",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Str(s) => f.write_str(s),
            Literal::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Literal::Record(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_owned())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// One `key: value` entry of a record literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Literal,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A metadata attachment on a declaration, e.g. `@docker:Config { name: "svc" }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Attachment name (`Config`, `CopyFiles`, ...)
    pub name: String,
    /// Arguments in source order
    pub args: Vec<KeyValue>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, args: Vec<KeyValue>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// First argument with the given key.
    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.args.iter().find(|kv| kv.key == key).map(|kv| &kv.value)
    }
}
