//! GraphQL transport and the query/mutation surface.
//!
//! Every method is one round trip. Pagination is not hidden here — paginated
//! queries return a single [`Connection`] page and the caller threads the
//! cursor (see `linops-core`'s paginator).

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{
    Connection, CreatedIssue, Issue, IssueCreateInput, IssueDepth, IssueFilter, Project, Team,
    User, Viewer, WorkflowState,
};
use crate::Result;

// ---------------------------------------------------------------------------
// Query documents
// ---------------------------------------------------------------------------

const VIEWER_QUERY: &str = "query { viewer { id name email } }";

const TEAMS_QUERY: &str = "\
query Teams($first: Int!, $after: String) {
  teams(first: $first, after: $after) {
    nodes { id name key }
    pageInfo { hasNextPage endCursor }
  }
}";

const ISSUES_QUERY_SLIM: &str = "\
query Issues($filter: IssueFilter, $first: Int!, $after: String, $includeArchived: Boolean) {
  issues(filter: $filter, first: $first, after: $after, includeArchived: $includeArchived) {
    nodes {
      id identifier title description createdAt url
      state { id }
      project { id }
      team { id }
      assignee { id }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const ISSUES_QUERY_FULL: &str = "\
query Issues($filter: IssueFilter, $first: Int!, $after: String, $includeArchived: Boolean) {
  issues(filter: $filter, first: $first, after: $after, includeArchived: $includeArchived) {
    nodes {
      id identifier title description createdAt url
      state { id name }
      project { id name }
      team { id name }
      assignee { id name }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const PROJECT_QUERY: &str =
    "query Project($id: String!) { project(id: $id) { id name state archivedAt } }";

const WORKFLOW_STATE_QUERY: &str =
    "query State($id: String!) { workflowState(id: $id) { id name } }";

const USER_QUERY: &str = "query User($id: String!) { user(id: $id) { id name email } }";

const TEAM_QUERY: &str = "query Team($id: String!) { team(id: $id) { id name key } }";

const ISSUE_CREATE_MUTATION: &str = "\
mutation IssueCreate($input: IssueCreateInput!) {
  issueCreate(input: $input) {
    success
    issue { id identifier title url }
  }
}";

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LinearClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    page_size: usize,
}

impl LinearClient {
    /// Construct a client from explicit configuration. Fails on an empty key;
    /// whether the key is *valid* is only known after [`Self::validate`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint,
            api_key: config.api_key,
            page_size: config.page_size,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Check the key against the API by fetching the authenticated user.
    pub async fn validate(&self) -> Result<Viewer> {
        self.viewer().await
    }

    pub async fn viewer(&self) -> Result<Viewer> {
        let data = self.execute(VIEWER_QUERY, Value::Null).await?;
        decode(&data, "viewer")
    }

    /// One page of the workspace's teams.
    pub async fn teams_page(&self, cursor: Option<String>) -> Result<Connection<Team>> {
        let variables = json!({ "first": self.page_size, "after": cursor });
        let data = self.execute(TEAMS_QUERY, variables).await?;
        decode(&data, "teams")
    }

    /// One page of issues matching `filter`.
    pub async fn issues_page(
        &self,
        filter: &IssueFilter,
        depth: IssueDepth,
        cursor: Option<String>,
    ) -> Result<Connection<Issue>> {
        let query = match depth {
            IssueDepth::Slim => ISSUES_QUERY_SLIM,
            IssueDepth::Full => ISSUES_QUERY_FULL,
        };
        let variables = json!({
            "filter": filter.to_graphql(),
            "first": self.page_size,
            "after": cursor,
            "includeArchived": filter.include_archived,
        });
        let data = self.execute(query, variables).await?;
        decode(&data, "issues")
    }

    pub async fn project(&self, id: &str) -> Result<Option<Project>> {
        let data = self.execute(PROJECT_QUERY, json!({ "id": id })).await?;
        decode_optional(&data, "project")
    }

    pub async fn workflow_state(&self, id: &str) -> Result<Option<WorkflowState>> {
        let data = self
            .execute(WORKFLOW_STATE_QUERY, json!({ "id": id }))
            .await?;
        decode_optional(&data, "workflowState")
    }

    pub async fn user(&self, id: &str) -> Result<Option<User>> {
        let data = self.execute(USER_QUERY, json!({ "id": id })).await?;
        decode_optional(&data, "user")
    }

    pub async fn team(&self, id: &str) -> Result<Option<Team>> {
        let data = self.execute(TEAM_QUERY, json!({ "id": id })).await?;
        decode_optional(&data, "team")
    }

    /// Create an issue and return the created identifier/URL.
    pub async fn create_issue(&self, input: IssueCreateInput) -> Result<CreatedIssue> {
        let variables = json!({ "input": input });
        let data = self.execute(ISSUE_CREATE_MUTATION, variables).await?;
        let payload = &data["issueCreate"];
        if payload["success"] != Value::Bool(true) {
            return Err(ClientError::Api("issueCreate reported failure".into()));
        }
        Ok(serde_json::from_value(payload["issue"].clone())?)
    }

    /// POST one GraphQL document and return the `data` object.
    ///
    /// 401 maps to [`ClientError::Unauthorized`]; any `errors[]` entry in an
    /// otherwise-OK response maps to [`ClientError::Api`] with the messages
    /// joined. No retries.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let mut body = json!({ "query": query });
        if !variables.is_null() {
            body["variables"] = variables;
        }

        tracing::debug!(endpoint = %self.endpoint, "executing GraphQL request");
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!("HTTP {status}: {text}")));
        }

        let envelope: Value = response.json().await?;
        if let Some(errors) = envelope["errors"].as_array() {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e["message"].as_str())
                    .collect();
                return Err(ClientError::Api(messages.join("; ")));
            }
        }
        match envelope.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(ClientError::Decode("response has no data object".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding helpers
// ---------------------------------------------------------------------------

fn decode<T: DeserializeOwned>(data: &Value, field: &str) -> Result<T> {
    let value = data
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ClientError::Decode(format!("missing field '{field}'")))?;
    Ok(serde_json::from_value(value.clone())?)
}

fn decode_optional<T: DeserializeOwned>(data: &Value, field: &str) -> Result<Option<T>> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> LinearClient {
        let config = ClientConfig::new("lin_api_test")
            .with_endpoint(format!("{}/graphql", server.url()))
            .with_page_size(2);
        LinearClient::new(config).unwrap()
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = LinearClient::new(ClientConfig::new("  ")).unwrap_err();
        assert!(matches!(err, ClientError::MissingApiKey));
    }

    #[tokio::test]
    async fn viewer_decodes_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "lin_api_test")
            .with_status(200)
            .with_body(r#"{"data":{"viewer":{"id":"u1","name":"Ada","email":"ada@acme.dev"}}}"#)
            .create_async()
            .await;

        let viewer = client_for(&server).viewer().await.unwrap();
        assert_eq!(viewer.id, "u1");
        assert_eq!(viewer.name, "Ada");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_typed_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(401)
            .with_body(r#"{"error":"unauthorized"}"#)
            .create_async()
            .await;

        let err = client_for(&server).viewer().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn graphql_errors_array_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"errors":[{"message":"Entity not found"}],"data":null}"#)
            .create_async()
            .await;

        let err = client_for(&server).viewer().await.unwrap_err();
        match err {
            ClientError::Api(msg) => assert!(msg.contains("Entity not found")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn issues_page_threads_cursor_into_variables() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"variables":{"after":"cur-1","first":2,"includeArchived":false}}"#.into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"data":{"issues":{
                    "nodes":[{
                        "id":"i3","identifier":"ENG-3","title":"Third","description":null,
                        "createdAt":"2024-06-01T12:00:00.000Z",
                        "url":"https://linear.app/acme/issue/ENG-3",
                        "state":null,"project":null,"team":null,"assignee":null
                    }],
                    "pageInfo":{"hasNextPage":false,"endCursor":null}
                }}}"#,
            )
            .create_async()
            .await;

        let page = client_for(&server)
            .issues_page(
                &IssueFilter::default(),
                IssueDepth::Full,
                Some("cur-1".into()),
            )
            .await
            .unwrap();
        assert_eq!(page.nodes.len(), 1);
        assert_eq!(page.nodes[0].identifier, "ENG-3");
        assert!(!page.page_info.has_next_page);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_project_decodes_to_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data":{"project":null}}"#)
            .create_async()
            .await;

        let project = client_for(&server).project("nope").await.unwrap();
        assert!(project.is_none());
    }

    #[tokio::test]
    async fn create_issue_returns_created_identifier() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"variables":{"input":{"teamId":"t1","title":"New bug"}}}"#.into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"data":{"issueCreate":{"success":true,
                    "issue":{"id":"i9","identifier":"ENG-9","title":"New bug",
                             "url":"https://linear.app/acme/issue/ENG-9"}}}}"#,
            )
            .create_async()
            .await;

        let created = client_for(&server)
            .create_issue(IssueCreateInput {
                team_id: "t1".into(),
                title: "New bug".into(),
                description: None,
                priority: None,
            })
            .await
            .unwrap();
        assert_eq!(created.identifier, "ENG-9");
    }

    #[tokio::test]
    async fn create_issue_failure_flag_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data":{"issueCreate":{"success":false,"issue":null}}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .create_issue(IssueCreateInput {
                team_id: "t1".into(),
                title: "New bug".into(),
                description: None,
                priority: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api(_)));
    }
}
