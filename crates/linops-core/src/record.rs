//! Flattened issue records.
//!
//! An [`IssueLite`] is an issue with every relation resolved down to plain
//! ids and names. It is created once per issue by the snapshot stage and
//! never mutated afterwards; the aggregation helpers consume slices of them.

use chrono::{DateTime, Utc};
use linear_client::Issue;
use serde::Serialize;

use crate::error::Result;
use crate::relation::Relation;

/// An issue with all relations de-lazified.
#[derive(Debug, Clone, Serialize)]
pub struct IssueLite {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub state_name: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub team_name: Option<String>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
}

/// The four lazy relations of one issue, however they arrived.
///
/// `project` and `assignee` resolve to `(id, name)` pairs because the
/// aggregations key on the id and display the name.
pub struct IssueRelations {
    pub state: Relation<String>,
    pub project: Relation<(String, String)>,
    pub team: Relation<String>,
    pub assignee: Relation<(String, String)>,
}

impl IssueRelations {
    /// All four relations absent.
    pub fn none() -> Self {
        Self {
            state: Relation::Absent,
            project: Relation::Absent,
            team: Relation::Absent,
            assignee: Relation::Absent,
        }
    }
}

/// Resolve an issue's relations and build the flattened record.
///
/// Resolution errors propagate; a relation that comes back empty simply
/// leaves the corresponding fields `None`.
pub async fn flatten(issue: Issue, relations: IssueRelations) -> Result<IssueLite> {
    let state_name = relations.state.resolve().await?;
    let project = relations.project.resolve().await?;
    let team_name = relations.team.resolve().await?;
    let assignee = relations.assignee.resolve().await?;

    let (project_id, project_name) = split(project);
    let (assignee_id, assignee_name) = split(assignee);

    Ok(IssueLite {
        id: issue.id,
        identifier: issue.identifier,
        title: issue.title,
        url: issue.url,
        created_at: issue.created_at,
        state_name,
        project_id,
        project_name,
        team_name,
        assignee_id,
        assignee_name,
    })
}

fn split(pair: Option<(String, String)>) -> (Option<String>, Option<String>) {
    match pair {
        Some((id, name)) => (Some(id), Some(name)),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(identifier: &str) -> Issue {
        serde_json::from_value(serde_json::json!({
            "id": format!("id-{identifier}"),
            "identifier": identifier,
            "title": "A title",
            "description": null,
            "createdAt": "2024-06-01T12:00:00.000Z",
            "url": format!("https://linear.app/acme/issue/{identifier}"),
            "state": null, "project": null, "team": null, "assignee": null
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn flatten_with_no_relations_leaves_fields_none() {
        let lite = flatten(issue("ENG-1"), IssueRelations::none())
            .await
            .unwrap();
        assert_eq!(lite.identifier, "ENG-1");
        assert!(lite.state_name.is_none());
        assert!(lite.project_id.is_none());
        assert!(lite.assignee_name.is_none());
    }

    #[tokio::test]
    async fn flatten_mixes_inline_and_lazy_shapes() {
        let relations = IssueRelations {
            state: Relation::Value("In Review".into()),
            project: Relation::thunk(|| async { Ok(Some(("p1".into(), "Mobile".into()))) }),
            team: Relation::deferred(async { Ok(Some("Backend".into())) }),
            assignee: Relation::Absent,
        };
        let lite = flatten(issue("ENG-2"), relations).await.unwrap();
        assert_eq!(lite.state_name.as_deref(), Some("In Review"));
        assert_eq!(lite.project_id.as_deref(), Some("p1"));
        assert_eq!(lite.project_name.as_deref(), Some("Mobile"));
        assert_eq!(lite.team_name.as_deref(), Some("Backend"));
        assert!(lite.assignee_id.is_none());
    }

    #[tokio::test]
    async fn relation_error_propagates_out_of_flatten() {
        let relations = IssueRelations {
            state: Relation::deferred(async {
                Err(crate::error::OpsError::TeamNotFound("x".into()))
            }),
            project: Relation::Absent,
            team: Relation::Absent,
            assignee: Relation::Absent,
        };
        assert!(flatten(issue("ENG-3"), relations).await.is_err());
    }
}
