use std::path::Path;
use std::sync::Arc;

use linear_client::LinearClient;
use linops_core::analyzer::{run_analyzer, AnalyzerCommand};
use linops_core::export::{export_requests, ExportOptions};

use crate::config::FileConfig;

pub struct ExportArgs<'a> {
    pub label: String,
    pub team: Option<String>,
    pub out: &'a Path,
    pub analyze: bool,
    pub python: Option<String>,
    pub script: Option<String>,
}

pub async fn run(config: &FileConfig, args: ExportArgs<'_>) -> anyhow::Result<()> {
    let client = Arc::new(LinearClient::new(config.client_config()?)?);

    let options = ExportOptions {
        label: args.label,
        team_key: args.team,
        include_archived: false,
    };
    let rows = export_requests(&client, &options, args.out).await?;
    println!("exported {} request(s) to {}", rows, args.out.display());

    if args.analyze {
        let mut command = AnalyzerCommand::default();
        if let Some(python) = args.python {
            command.program = python;
        }
        if let Some(script) = args.script {
            command.args = vec![script];
        }
        let cwd = std::env::current_dir()?;
        run_analyzer(&command, args.out, &cwd).await?;
    }
    Ok(())
}
