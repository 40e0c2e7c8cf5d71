//! Workspace snapshot pipeline.
//!
//! ```text
//! paginate(issues)            ← sequential, cursor-threaded
//!     │
//!     ▼
//! map_bounded(flatten)        ← ≤ concurrency relation resolutions in flight
//!     │
//!     ▼
//! Vec<IssueLite>              ← immutable flattened records
//!     │
//!     ▼
//! aggregate helpers           ← synchronous grouping / counting / sorting
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use linear_client::{Issue, IssueDepth, IssueFilter, LinearClient, Project};
use serde::Serialize;

use crate::aggregate::{
    active_project_rows, assignee_load_rows, group_by_project_and_state, ActiveProjectRow,
    AssigneeLoadRow, ProjectBucket,
};
use crate::error::Result;
use crate::fanout::map_bounded;
use crate::page::{paginate, Page};
use crate::record::{flatten, IssueLite, IssueRelations};
use crate::relation::Relation;

/// Default bound on simultaneous relation fetches.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub filter: IssueFilter,
    pub depth: IssueDepth,
    pub concurrency: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            filter: IssueFilter::default(),
            depth: IssueDepth::Full,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSnapshot {
    pub generated_at: DateTime<Utc>,
    pub total_issues: usize,
    pub issues: Vec<IssueLite>,
    pub by_project: Vec<ProjectBucket>,
    pub active_projects: Vec<ActiveProjectRow>,
    pub assignee_load: Vec<AssigneeLoadRow>,
}

/// Produce a full workspace snapshot: every issue matching the filter,
/// flattened and aggregated.
pub async fn snapshot(
    client: Arc<LinearClient>,
    options: SnapshotOptions,
) -> Result<WorkspaceSnapshot> {
    let issues = collect_issues(&client, &options.filter, options.depth).await?;
    tracing::info!(count = issues.len(), "collected issues");

    let resolver = client.clone();
    let records = map_bounded(issues, options.concurrency, move |issue, _| {
        let client = resolver.clone();
        async move {
            let relations = relations_for(&client, &issue);
            flatten(issue, relations).await
        }
    })
    .await?;

    let projects = side_load_projects(&client, &records, options.concurrency).await?;

    let by_project = group_by_project_and_state(&records);
    let active_projects = active_project_rows(&records, &projects);
    let assignee_load = assignee_load_rows(&records);

    Ok(WorkspaceSnapshot {
        generated_at: Utc::now(),
        total_issues: records.len(),
        issues: records,
        by_project,
        active_projects,
        assignee_load,
    })
}

/// Drain every page of the issue connection.
pub async fn collect_issues(
    client: &Arc<LinearClient>,
    filter: &IssueFilter,
    depth: IssueDepth,
) -> Result<Vec<Issue>> {
    let client = client.clone();
    let filter = filter.clone();
    paginate(move |cursor| {
        let client = client.clone();
        let filter = filter.clone();
        async move {
            let conn = client.issues_page(&filter, depth, cursor).await?;
            Ok(Page::from(conn))
        }
    })
    .await
}

/// Build the four lazy relations for one issue.
///
/// An inline name becomes a concrete value; an id-only reference becomes a
/// thunk hitting the by-id lookup; a null reference is absent.
pub fn relations_for(client: &Arc<LinearClient>, issue: &Issue) -> IssueRelations {
    let state = match &issue.state {
        None => Relation::Absent,
        Some(r) => match &r.name {
            Some(name) => Relation::Value(name.clone()),
            None => {
                let (client, id) = (client.clone(), r.id.clone());
                Relation::thunk(move || async move {
                    Ok(client.workflow_state(&id).await?.map(|s| s.name))
                })
            }
        },
    };

    let project = match &issue.project {
        None => Relation::Absent,
        Some(r) => match &r.name {
            Some(name) => Relation::Value((r.id.clone(), name.clone())),
            None => {
                let (client, id) = (client.clone(), r.id.clone());
                Relation::thunk(move || async move {
                    Ok(client.project(&id).await?.map(|p| (p.id, p.name)))
                })
            }
        },
    };

    let team = match &issue.team {
        None => Relation::Absent,
        Some(r) => match &r.name {
            Some(name) => Relation::Value(name.clone()),
            None => {
                let (client, id) = (client.clone(), r.id.clone());
                Relation::thunk(move || async move { Ok(client.team(&id).await?.map(|t| t.name)) })
            }
        },
    };

    let assignee = match &issue.assignee {
        None => Relation::Absent,
        Some(r) => match &r.name {
            Some(name) => Relation::Value((r.id.clone(), name.clone())),
            None => {
                let (client, id) = (client.clone(), r.id.clone());
                Relation::thunk(move || async move {
                    Ok(client.user(&id).await?.map(|u| (u.id, u.name)))
                })
            }
        },
    };

    IssueRelations {
        state,
        project,
        team,
        assignee,
    }
}

/// Fetch each distinct referenced project once, bounded.
async fn side_load_projects(
    client: &Arc<LinearClient>,
    records: &[IssueLite],
    concurrency: usize,
) -> Result<Vec<Project>> {
    let mut seen = HashSet::new();
    let ids: Vec<String> = records
        .iter()
        .filter_map(|r| r.project_id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let client = client.clone();
    let fetched = map_bounded(ids, concurrency, move |id, _| {
        let client = client.clone();
        async move { Ok(client.project(&id).await?) }
    })
    .await?;

    Ok(fetched.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linear_client::ClientConfig;

    fn issue_node(
        identifier: &str,
        project: Option<(&str, &str)>,
        state: Option<&str>,
        assignee: Option<(&str, &str)>,
    ) -> serde_json::Value {
        serde_json::json!({
            "id": format!("id-{identifier}"),
            "identifier": identifier,
            "title": format!("Title {identifier}"),
            "description": null,
            "createdAt": "2024-06-01T12:00:00.000Z",
            "url": format!("https://linear.app/acme/issue/{identifier}"),
            "state": state.map(|s| serde_json::json!({ "id": format!("st-{s}"), "name": s })),
            "project": project.map(|(id, name)| serde_json::json!({ "id": id, "name": name })),
            "team": { "id": "t1", "name": "Backend" },
            "assignee": assignee.map(|(id, name)| serde_json::json!({ "id": id, "name": name })),
        })
    }

    #[tokio::test]
    async fn snapshot_paginates_flattens_and_aggregates() {
        let mut server = mockito::Server::new_async().await;

        // Page 1 of the issue connection.
        server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::Regex(r#""after":null"#.into()))
            .with_status(200)
            .with_body(
                serde_json::json!({ "data": { "issues": {
                    "nodes": [
                        issue_node("ENG-1", Some(("p1", "Mobile")), Some("In Progress"), Some(("u1", "Ada"))),
                        issue_node("ENG-2", None, None, None),
                    ],
                    "pageInfo": { "hasNextPage": true, "endCursor": "c1" }
                }}})
                .to_string(),
            )
            .create_async()
            .await;

        // Page 2, requested with page 1's cursor.
        server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::Regex(r#""after":"c1""#.into()))
            .with_status(200)
            .with_body(
                serde_json::json!({ "data": { "issues": {
                    "nodes": [issue_node("ENG-3", Some(("p1", "Mobile")), Some("Todo"), None)],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                }}})
                .to_string(),
            )
            .create_async()
            .await;

        // Side-loaded project lookup for the one referenced project.
        server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::Regex("query Project".into()))
            .with_status(200)
            .with_body(
                serde_json::json!({ "data": { "project": {
                    "id": "p1", "name": "Mobile", "state": "started", "archivedAt": null
                }}})
                .to_string(),
            )
            .create_async()
            .await;

        let client = Arc::new(
            LinearClient::new(
                ClientConfig::new("lin_api_test")
                    .with_endpoint(format!("{}/graphql", server.url())),
            )
            .unwrap(),
        );

        let snap = snapshot(client, SnapshotOptions::default()).await.unwrap();

        assert_eq!(snap.total_issues, 3);
        assert_eq!(snap.issues[0].identifier, "ENG-1");
        assert_eq!(snap.issues[2].identifier, "ENG-3");

        // First-seen project order: Mobile (ENG-1) before the placeholder.
        assert_eq!(snap.by_project[0].project_name, "Mobile");
        assert_eq!(snap.by_project[0].total, 2);

        assert_eq!(snap.active_projects.len(), 1);
        assert_eq!(snap.active_projects[0].project_id, "p1");
        assert_eq!(snap.active_projects[0].issue_count, 2);

        assert_eq!(snap.assignee_load.len(), 2);
        // Unassigned bucket (2) sorts above Ada (1).
        assert!(snap.assignee_load[0].assignee_id.is_none());
        assert_eq!(snap.assignee_load[0].issue_count, 2);
        assert_eq!(snap.assignee_load[1].display_name, "Ada");
    }

    #[tokio::test]
    async fn fetch_failure_mid_pagination_fails_the_snapshot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::Regex(r#""after":null"#.into()))
            .with_status(200)
            .with_body(
                serde_json::json!({ "data": { "issues": {
                    "nodes": [issue_node("ENG-1", None, None, None)],
                    "pageInfo": { "hasNextPage": true, "endCursor": "c1" }
                }}})
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::Regex(r#""after":"c1""#.into()))
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let client = Arc::new(
            LinearClient::new(
                ClientConfig::new("lin_api_test")
                    .with_endpoint(format!("{}/graphql", server.url())),
            )
            .unwrap(),
        );

        let result = snapshot(client, SnapshotOptions::default()).await;
        assert!(result.is_err(), "partial results are never returned");
    }
}
