//! Serde models for the slice of the Linear GraphQL schema this workspace
//! touches: viewer, teams, projects, workflow states, users, issues, and the
//! connection envelope used by every paginated query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// The authenticated user returned by the `viewer` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub key: String,
}

/// A project with the fields the snapshot aggregations need.
///
/// `state` is the project status slug (`planned`, `started`, `completed`, …);
/// `archived_at` is set when the project has been archived regardless of
/// status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub state: String,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
}

/// An inline relation payload on an issue node.
///
/// The slim issue query selects only `{ id }`, the full query `{ id name }` —
/// so `name` is `None` exactly when the relation still needs a by-id lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub state: Option<RelationRef>,
    pub project: Option<RelationRef>,
    pub team: Option<RelationRef>,
    pub assignee: Option<RelationRef>,
}

/// The issue returned by the `issueCreate` mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Connection envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of a cursor-based connection, exactly as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
}

// ---------------------------------------------------------------------------
// Query inputs
// ---------------------------------------------------------------------------

/// How much of each issue's relations to select.
///
/// `Slim` fetches relation ids only (name resolution becomes a lazy by-id
/// lookup); `Full` fetches ids and names inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueDepth {
    Slim,
    #[default]
    Full,
}

/// Caller-supplied issue filter. Every field is optional; archived inclusion
/// is an explicit choice, never a hidden default.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub team_key: Option<String>,
    pub state_name: Option<String>,
    pub assignee_email: Option<String>,
    pub label: Option<String>,
    pub include_archived: bool,
}

impl IssueFilter {
    /// Render the non-empty fields as a Linear `IssueFilter` GraphQL value.
    /// Returns `None` when no field is set so the query can omit the argument.
    pub fn to_graphql(&self) -> Option<serde_json::Value> {
        let mut filter = serde_json::Map::new();
        if let Some(key) = &self.team_key {
            filter.insert("team".into(), serde_json::json!({ "key": { "eq": key } }));
        }
        if let Some(name) = &self.state_name {
            filter.insert("state".into(), serde_json::json!({ "name": { "eq": name } }));
        }
        if let Some(email) = &self.assignee_email {
            filter.insert(
                "assignee".into(),
                serde_json::json!({ "email": { "eq": email } }),
            );
        }
        if let Some(label) = &self.label {
            filter.insert(
                "labels".into(),
                serde_json::json!({ "name": { "eq": label } }),
            );
        }
        if filter.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(filter))
        }
    }
}

/// Input for the `issueCreate` mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreateInput {
    pub team_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 0 = none, 1 = urgent, 2 = high, 3 = normal, 4 = low.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_renders_to_none() {
        assert!(IssueFilter::default().to_graphql().is_none());
    }

    #[test]
    fn filter_renders_set_fields_only() {
        let filter = IssueFilter {
            team_key: Some("ENG".into()),
            label: Some("customer-request".into()),
            ..Default::default()
        };
        let value = filter.to_graphql().unwrap();
        assert_eq!(value["team"]["key"]["eq"], "ENG");
        assert_eq!(value["labels"]["name"]["eq"], "customer-request");
        assert!(value.get("state").is_none());
        assert!(value.get("assignee").is_none());
    }

    #[test]
    fn issue_decodes_with_slim_relations() {
        let json = serde_json::json!({
            "id": "i1",
            "identifier": "ENG-1",
            "title": "Crash on save",
            "description": null,
            "createdAt": "2024-06-01T12:00:00.000Z",
            "url": "https://linear.app/acme/issue/ENG-1",
            "state": { "id": "s1", "name": null },
            "project": null,
            "team": { "id": "t1", "name": null },
            "assignee": null
        });
        let issue: Issue = serde_json::from_value(json).unwrap();
        assert_eq!(issue.identifier, "ENG-1");
        assert_eq!(issue.state.as_ref().unwrap().id, "s1");
        assert!(issue.state.as_ref().unwrap().name.is_none());
        assert!(issue.project.is_none());
    }

    #[test]
    fn issue_create_input_skips_unset_fields() {
        let input = IssueCreateInput {
            team_id: "t1".into(),
            title: "New issue".into(),
            description: None,
            priority: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("priority").is_none());
        assert_eq!(value["teamId"], "t1");
    }
}
