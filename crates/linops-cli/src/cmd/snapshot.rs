use std::path::Path;
use std::sync::Arc;

use linear_client::{IssueDepth, IssueFilter, LinearClient};
use linops_core::report;
use linops_core::{snapshot, SnapshotOptions};

use crate::config::FileConfig;
use crate::output;

pub struct SnapshotArgs<'a> {
    pub out: Option<&'a Path>,
    pub csv: Option<&'a Path>,
    pub concurrency: Option<usize>,
    pub team: Option<String>,
    pub include_archived: bool,
}

pub async fn run(config: &FileConfig, args: SnapshotArgs<'_>, json: bool) -> anyhow::Result<()> {
    let client = Arc::new(LinearClient::new(config.client_config()?)?);

    let options = SnapshotOptions {
        filter: IssueFilter {
            team_key: args.team,
            include_archived: args.include_archived,
            ..Default::default()
        },
        depth: IssueDepth::Full,
        concurrency: config.concurrency(args.concurrency),
    };
    let snap = snapshot(client, options).await?;

    if let Some(csv_path) = args.csv {
        let file = std::fs::File::create(csv_path)?;
        report::write_issues_csv(&snap.issues, file)?;
        eprintln!("wrote {}", csv_path.display());
    }

    if json {
        output::print_json(&snap)?;
    } else {
        output::write_or_stdout(args.out, &report::to_markdown(&snap))?;
    }
    Ok(())
}
