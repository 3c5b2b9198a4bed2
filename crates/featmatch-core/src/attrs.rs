use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;

/// Attribute key compared when matching nodes.
pub const NODE_TYPE_KEY: &str = "type";
/// Attribute key compared when matching edges.
pub const ANGULAR_TYPE_KEY: &str = "angular_type";

/// Node identifier, keeping the JSON kind it was written with.
///
/// `3` and `"3"` are different nodes. Numbers are compared by value, so `3` and `3.0` name the
/// same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Str(String),
    /// Canonical decimal text of a JSON number.
    Num(String),
}

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self::Str(id.into())
    }

    pub fn number(n: i64) -> Self {
        Self::Num(n.to_string())
    }

    /// Label text. Not unique across kinds; see [`NodeId::key`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Str(s) | Self::Num(s) => s,
        }
    }

    /// JSON text of the id (`3` or `"3"`), unique per id.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Owned(Value::String(s.clone()).to_string()),
            Self::Num(n) => Cow::Borrowed(n.as_str()),
        }
    }

    /// Converts a JSON identifier value. Only strings and numbers are accepted.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => Some(Self::Num(canonical_number(n))),
            _ => None,
        }
    }
}

fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Ordered attribute mapping attached to a node or an edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrBag(IndexMap<String, Value>);

impl AttrBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value only when it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Text form of `key`, or `default` when absent.
    ///
    /// Strings are returned verbatim, other JSON values as their JSON text.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Cow<'a, str> {
        match self.0.get(key) {
            None => Cow::Borrowed(default),
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    pub fn node_type(&self) -> Option<&Value> {
        self.get(NODE_TYPE_KEY)
    }

    pub fn angular_type(&self) -> Option<&Value> {
        self.get(ANGULAR_TYPE_KEY)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Merges `other` into `self`; keys present in both take `other`'s value.
    pub fn merge(&mut self, other: AttrBag) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for AttrBag {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, Value)> for AttrBag {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Display classification of an edge's angular type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// Convex edge (`CX`).
    Convex,
    /// Anything else, including a missing attribute (`CC`).
    Concave,
}

impl EdgeClass {
    pub fn of(attrs: &AttrBag) -> Self {
        match attrs.get_str(ANGULAR_TYPE_KEY) {
            Some(s) if s.eq_ignore_ascii_case("convex") => Self::Convex,
            _ => Self::Concave,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Convex => "CX",
            Self::Concave => "CC",
        }
    }
}

impl std::fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
