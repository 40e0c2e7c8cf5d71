use linear_client::LinearClient;

use crate::config::FileConfig;
use crate::output;

pub async fn run(config: &FileConfig, json: bool) -> anyhow::Result<()> {
    let client = LinearClient::new(config.client_config()?)?;
    let viewer = client.validate().await?;
    if json {
        output::print_json(&viewer)?;
    } else {
        println!(
            "{} <{}>",
            viewer.name,
            viewer.email.as_deref().unwrap_or("-")
        );
        println!("id: {}", viewer.id);
    }
    Ok(())
}
