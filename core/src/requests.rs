//! Parameter structs for the supported Conduit methods.
//!
//! Empty fields are skipped on the wire so the server applies its defaults.

use serde::Serialize;

use crate::epoch::{serialize_required, Epoch};
use crate::order::{is_unset, SearchOrder};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhidLookupRequest {
    /// Monograms or names, e.g. `T123` or `@alice`.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhidQueryRequest {
    pub phids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasteQueryRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phids: Vec<String>,
    #[serde(rename = "authorPHIDs", skip_serializing_if = "Vec::is_empty")]
    pub author_phids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectQueryRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slugs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// e.g. `status-any`, `status-open`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// Paging controls shared by `*.search` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCursor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManiphestSearchRequest {
    /// Built-in or saved query to start from, e.g. `"open"`.
    #[serde(rename = "queryKey", skip_serializing_if = "Option::is_none")]
    pub query_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<SearchConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<SearchAttachments>,
    #[serde(skip_serializing_if = "is_unset")]
    pub order: Option<SearchOrder>,
    #[serde(flatten)]
    pub cursor: SearchCursor,
}

/// Which attachments to return with each result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchAttachments {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub subscribers: bool,
    /// Workboard columns the task appears in.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub columns: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub projects: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchConstraints {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phids: Vec<String>,
    #[serde(rename = "assigned", skip_serializing_if = "Vec::is_empty")]
    pub assigned_to: Vec<String>,
    #[serde(rename = "authorPHIDs", skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priorities: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,
    #[serde(rename = "columnPHIDs", skip_serializing_if = "Vec::is_empty")]
    pub column_phids: Vec<String>,
    #[serde(rename = "hasParents", skip_serializing_if = "Option::is_none")]
    pub open_parents: Option<bool>,
    #[serde(rename = "hasSubtasks", skip_serializing_if = "Option::is_none")]
    pub open_subtasks: Option<bool>,
    #[serde(rename = "parentIDs", skip_serializing_if = "Vec::is_empty")]
    pub parent_ids: Vec<u64>,
    #[serde(rename = "subtaskIDs", skip_serializing_if = "Vec::is_empty")]
    pub subtask_ids: Vec<u64>,
    #[serde(
        rename = "createdStart",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_required"
    )]
    pub created_after: Option<Epoch>,
    #[serde(
        rename = "createdEnd",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_required"
    )]
    pub created_before: Option<Epoch>,
    #[serde(
        rename = "modifiedStart",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_required"
    )]
    pub modified_after: Option<Epoch>,
    #[serde(
        rename = "modifiedEnd",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_required"
    )]
    pub modified_before: Option<Epoch>,
    #[serde(
        rename = "closedStart",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_required"
    )]
    pub closed_after: Option<Epoch>,
    #[serde(
        rename = "closedEnd",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_required"
    )]
    pub closed_before: Option<Epoch>,
    #[serde(rename = "closerPHIDs", skip_serializing_if = "Vec::is_empty")]
    pub closed_by: Vec<String>,
    /// Fulltext query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscribers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spaces: Vec<String>,
}
