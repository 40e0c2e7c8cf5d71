use std::sync::Arc;

use linear_client::{ClientError, IssueCreateInput, LinearClient};
use linops_core::{paginate, OpsError, Page};

use crate::config::FileConfig;
use crate::output;

pub async fn run(
    config: &FileConfig,
    team_key: &str,
    title: &str,
    description: Option<&str>,
    priority: Option<u8>,
    json: bool,
) -> anyhow::Result<()> {
    let client = Arc::new(LinearClient::new(config.client_config()?)?);

    // Resolve the team key to an id; keys are short, one enumeration is fine.
    let teams = paginate(|cursor| {
        let client = client.clone();
        async move { Ok::<_, ClientError>(Page::from(client.teams_page(cursor).await?)) }
    })
    .await?;
    let team = teams
        .iter()
        .find(|t| t.key.eq_ignore_ascii_case(team_key))
        .ok_or_else(|| OpsError::TeamNotFound(team_key.to_string()))?;

    let created = client
        .create_issue(IssueCreateInput {
            team_id: team.id.clone(),
            title: title.to_string(),
            description: description.map(String::from),
            priority,
        })
        .await?;

    if json {
        output::print_json(&created)?;
    } else {
        println!("created {}: {}", created.identifier, created.url);
    }
    Ok(())
}
