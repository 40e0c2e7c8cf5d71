use std::sync::Arc;

use linear_client::{ClientError, LinearClient};
use linops_core::{paginate, Page};

use crate::config::FileConfig;
use crate::output;

pub async fn run(config: &FileConfig, json: bool) -> anyhow::Result<()> {
    let client = Arc::new(LinearClient::new(config.client_config()?)?);

    let teams = paginate(|cursor| {
        let client = client.clone();
        async move { Ok::<_, ClientError>(Page::from(client.teams_page(cursor).await?)) }
    })
    .await?;

    if json {
        output::print_json(&teams)?;
    } else {
        let rows = teams
            .iter()
            .map(|t| vec![t.key.clone(), t.name.clone(), t.id.clone()])
            .collect();
        output::print_table(&["KEY", "NAME", "ID"], rows);
    }
    Ok(())
}
