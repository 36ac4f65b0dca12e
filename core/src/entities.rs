//! Objects returned inside `result` payloads.
//!
//! # Design
//! These mirror the server's JSON field names through `serde(rename)`. Fields
//! the server may leave out or null are `Option`/`#[serde(default)]`, so a
//! newer or trimmed-down server does not break decoding.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::columns::BoardAttachment;
use crate::epoch::Epoch;

/// Deserialize `T`, mapping `null` and `[]` to `T::default()`.
///
/// PHP serializes an empty associative array as `[]`, which shows up for
/// empty maps and for attachment objects nobody asked for.
pub(crate) fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(T::default()),
        Value::Array(ref items) if items.is_empty() => Ok(T::default()),
        _ => serde_json::from_value(value).map_err(D::Error::custom),
    }
}

/// Pagination cursor returned by search methods.
///
/// The client never follows it; pass `after` back in the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

/// One entry of `conduit.getcapabilities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub authentication: Vec<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub output: Vec<String>,
}

/// A method description from `conduit.query`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConduitMethod {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub params: BTreeMap<String, String>,
    #[serde(default, rename = "return")]
    pub return_type: String,
}

/// A handle resolved by `phid.lookup` or `phid.query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhidResult {
    pub phid: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default, rename = "typeName")]
    pub type_name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteItem {
    pub id: u64,
    #[serde(rename = "objectName")]
    pub object_name: String,
    pub phid: String,
    #[serde(rename = "authorPHID")]
    pub author_phid: String,
    #[serde(rename = "filePHID")]
    pub file_phid: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "dateCreated")]
    pub date_created: Epoch,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default, rename = "parentPHID")]
    pub parent_phid: Option<String>,
    /// Only present when the request asked for content.
    #[serde(default)]
    pub content: Option<String>,
}

/// A project as returned by `project.query`.
///
/// This legacy method reports the numeric id as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub phid: String,
    pub name: String,
    #[serde(default, rename = "profileImagePHID")]
    pub profile_image_phid: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub slugs: Vec<String>,
    #[serde(rename = "dateCreated")]
    pub date_created: Epoch,
    #[serde(rename = "dateModified")]
    pub date_modified: Epoch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManiphestTask {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub phid: String,
    pub fields: ManiphestTaskFields,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub attachments: ManiphestTaskAttachments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManiphestTaskFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<TaskDescription>,
    #[serde(rename = "authorPHID")]
    pub author_phid: String,
    #[serde(default, rename = "ownerPHID")]
    pub owner_phid: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub subtype: String,
    #[serde(default, rename = "closerPHID")]
    pub closer_phid: Option<String>,
    #[serde(default, rename = "dateClosed")]
    pub date_closed: Option<Epoch>,
    #[serde(default, rename = "spacePHID")]
    pub space_phid: Option<String>,
    #[serde(rename = "dateCreated")]
    pub date_created: Epoch,
    #[serde(rename = "dateModified")]
    pub date_modified: Epoch,
    #[serde(default)]
    pub policy: Policy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescription {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub value: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPriority {
    pub value: i64,
    #[serde(default)]
    pub subpriority: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub interact: String,
    #[serde(default)]
    pub edit: String,
}

/// Extra data requested through `SearchAttachments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManiphestTaskAttachments {
    #[serde(default)]
    pub columns: Option<ColumnsAttachment>,
    #[serde(default)]
    pub subscribers: Option<SubscribersAttachment>,
    #[serde(default)]
    pub projects: Option<ProjectsAttachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsAttachment {
    #[serde(default)]
    pub boards: BoardAttachment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribersAttachment {
    #[serde(default, rename = "subscriberPHIDs")]
    pub subscriber_phids: Vec<String>,
    #[serde(default, rename = "subscriberCount")]
    pub subscriber_count: u64,
    #[serde(default, rename = "viewerIsSubscribed")]
    pub viewer_is_subscribed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsAttachment {
    #[serde(default, rename = "projectPHIDs")]
    pub project_phids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_json(attachments: Value) -> Value {
        json!({
            "id": 17,
            "type": "TASK",
            "phid": "PHID-TASK-abc",
            "fields": {
                "name": "Fix the thing",
                "description": {"raw": "It is broken."},
                "authorPHID": "PHID-USER-1",
                "ownerPHID": null,
                "status": {"value": "open", "name": "Open", "color": null},
                "priority": {"value": 90, "subpriority": 0, "name": "Needs Triage", "color": "violet"},
                "subtype": "default",
                "closerPHID": null,
                "dateClosed": null,
                "spacePHID": null,
                "dateCreated": 1700000000,
                "dateModified": 1700000100,
                "policy": {"view": "users", "interact": "users", "edit": "users"}
            },
            "attachments": attachments
        })
    }

    #[test]
    fn task_without_attachments() {
        let task: ManiphestTask = serde_json::from_value(task_json(json!([]))).unwrap();
        assert_eq!(task.id, 17);
        assert_eq!(task.fields.date_created, Epoch(1700000000));
        assert!(task.fields.date_closed.is_none());
        assert!(task.fields.owner_phid.is_none());
        assert_eq!(task.attachments, ManiphestTaskAttachments::default());
    }

    #[test]
    fn task_with_column_and_subscriber_attachments() {
        let task: ManiphestTask = serde_json::from_value(task_json(json!({
            "columns": {"boards": {
                "PHID-PROJ-1": {"columns": [{"id": 4, "phid": "PHID-PCOL-4", "name": "Doing"}]}
            }},
            "subscribers": {
                "subscriberPHIDs": ["PHID-USER-2"],
                "subscriberCount": 1,
                "viewerIsSubscribed": true
            }
        })))
        .unwrap();
        let boards = &task.attachments.columns.as_ref().unwrap().boards;
        assert_eq!(boards.board("PHID-PROJ-1").unwrap().columns[0].id, 4);
        let subscribers = task.attachments.subscribers.unwrap();
        assert_eq!(subscribers.subscriber_count, 1);
        assert!(subscribers.viewer_is_subscribed);
    }

    #[test]
    fn conduit_method_with_empty_params() {
        let method: ConduitMethod = serde_json::from_value(json!({
            "description": "Capabilities.",
            "params": [],
            "return": "dict<string, any>"
        }))
        .unwrap();
        assert!(method.params.is_empty());
        assert_eq!(method.return_type, "dict<string, any>");
    }

    #[test]
    fn cursor_with_nulls() {
        let cursor: Cursor =
            serde_json::from_value(json!({"limit": 100, "after": null, "before": null})).unwrap();
        assert_eq!(cursor.limit, 100);
        assert!(cursor.after.is_none());
    }
}
