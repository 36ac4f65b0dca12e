//! Result ordering for `*.search` methods.
//!
//! # Design
//! The `order` parameter is overloaded on the wire: a bare string names a
//! built-in preset, an array of strings lists sort keys (a leading `-`
//! reverses one). `SearchOrder` holds both slots; decoding fills whichever
//! shape the server sent, encoding prefers the preset.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Built-in orders understood by `maniphest.search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinOrder {
    Priority,
    Updated,
    Outdated,
    Newest,
    Oldest,
    Closed,
    Title,
    Relevance,
}

impl BuiltinOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Updated => "updated",
            Self::Outdated => "outdated",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Closed => "closed",
            Self::Title => "title",
            Self::Relevance => "relevance",
        }
    }
}

/// Result ordering for `*.search` calls: a built-in preset name, an explicit
/// list of sort keys, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOrder {
    /// Name of a built-in order, e.g. `"priority"`. Empty when unset.
    pub builtin: String,
    /// Sort keys, e.g. `["color", "-name", "id"]`.
    pub order: Vec<String>,
}

impl SearchOrder {
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            builtin: name.into(),
            order: Vec::new(),
        }
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            builtin: String::new(),
            order: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// True when neither slot is set; such a value encodes to nothing.
    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.order.is_empty()
    }
}

impl From<BuiltinOrder> for SearchOrder {
    fn from(order: BuiltinOrder) -> Self {
        Self::builtin(order.as_str())
    }
}

/// `skip_serializing_if` predicate for `Option<SearchOrder>` fields.
pub fn is_unset(order: &Option<SearchOrder>) -> bool {
    order.as_ref().map_or(true, SearchOrder::is_empty)
}

impl Serialize for SearchOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.builtin.is_empty() {
            serializer.serialize_str(&self.builtin)
        } else if !self.order.is_empty() {
            self.order.serialize(serializer)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for SearchOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Value::String(builtin) = value {
            return Ok(Self::builtin(builtin));
        }
        let order: Vec<String> = serde_json::from_value(value).map_err(D::Error::custom)?;
        Ok(Self::keys(order))
    }
}
