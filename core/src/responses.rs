//! Decoded `result` payloads for the supported Conduit methods.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{
    empty_as_default, Capabilities, ConduitMethod, Cursor, ManiphestTask, PasteItem, PhidResult,
    Project,
};

pub type CapabilitiesResponse = Capabilities;

/// Method name to description.
pub type ConduitQueryResponse = BTreeMap<String, ConduitMethod>;

/// Looked-up name to handle. Names that did not resolve are absent.
pub type PhidLookupResponse = BTreeMap<String, PhidResult>;

/// PHID to handle.
pub type PhidQueryResponse = BTreeMap<String, PhidResult>;

/// Paste PHID to paste.
pub type PasteQueryResponse = BTreeMap<String, PasteItem>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQueryResponse {
    /// Project PHID to project.
    #[serde(default, deserialize_with = "empty_as_default")]
    pub data: BTreeMap<String, Project>,
    /// Slug to project PHID.
    #[serde(default, rename = "slugMap", deserialize_with = "empty_as_default")]
    pub slug_map: BTreeMap<String, String>,
    #[serde(default)]
    pub cursor: Cursor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManiphestSearchResponse {
    #[serde(default)]
    pub data: Vec<ManiphestTask>,
    #[serde(default)]
    pub cursor: Cursor,
}
