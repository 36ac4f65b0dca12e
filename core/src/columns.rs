//! Workboard column attachments on search results.
//!
//! Depending on the server version, `attachments.columns.boards` is either a
//! map of board PHID to that board's columns, or directly a list of columns.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: u64,
    pub phid: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumns {
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAttachment {
    /// Board PHID to the columns the object sits in on that board.
    Boards(BTreeMap<String, BoardColumns>),
    /// A flat column list with no board grouping.
    Columns(Vec<Column>),
}

impl BoardAttachment {
    /// All columns regardless of shape, in board order for the map variant.
    pub fn columns(&self) -> Vec<&Column> {
        match self {
            Self::Boards(boards) => boards.values().flat_map(|b| b.columns.iter()).collect(),
            Self::Columns(columns) => columns.iter().collect(),
        }
    }

    pub fn board(&self, phid: &str) -> Option<&BoardColumns> {
        match self {
            Self::Boards(boards) => boards.get(phid),
            Self::Columns(_) => None,
        }
    }
}

impl Default for BoardAttachment {
    fn default() -> Self {
        Self::Boards(BTreeMap::new())
    }
}

impl Serialize for BoardAttachment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Boards(boards) => boards.serialize(serializer),
            Self::Columns(columns) => columns.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BoardAttachment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        // The map shape is the expected one; when it fails, only the list
        // attempt's error is reported.
        if let Ok(boards) = BTreeMap::<String, BoardColumns>::deserialize(&value) {
            return Ok(Self::Boards(boards));
        }
        Vec::<Column>::deserialize(&value)
            .map(Self::Columns)
            .map_err(D::Error::custom)
    }
}
