use std::sync::Arc;

use clap::{Args, Subcommand};
use linear_client::{IssueDepth, IssueFilter, LinearClient};
use linops_core::snapshot::collect_issues;

use crate::config::FileConfig;
use crate::output;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Team key (e.g. ENG)
    #[arg(long)]
    pub team: Option<String>,

    /// Workflow state name (e.g. "In Progress")
    #[arg(long)]
    pub state: Option<String>,

    /// Assignee email
    #[arg(long)]
    pub assignee: Option<String>,

    /// Label name
    #[arg(long)]
    pub label: Option<String>,

    /// Include archived issues
    #[arg(long)]
    pub include_archived: bool,
}

impl FilterArgs {
    fn to_filter(&self) -> IssueFilter {
        IssueFilter {
            team_key: self.team.clone(),
            state_name: self.state.clone(),
            assignee_email: self.assignee.clone(),
            label: self.label.clone(),
            include_archived: self.include_archived,
        }
    }
}

#[derive(Subcommand)]
pub enum IssuesSubcommand {
    /// List matching issues
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Keep only the first N issues after the full enumeration
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Count matching issues
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

pub async fn run(config: &FileConfig, subcommand: IssuesSubcommand, json: bool) -> anyhow::Result<()> {
    let client = Arc::new(LinearClient::new(config.client_config()?)?);

    match subcommand {
        IssuesSubcommand::List { filter, limit } => {
            let mut issues =
                collect_issues(&client, &filter.to_filter(), IssueDepth::Full).await?;
            // The enumeration itself is uncapped; trimming happens here.
            if let Some(limit) = limit {
                issues.truncate(limit);
            }
            if json {
                output::print_json(&issues)?;
            } else {
                let rows = issues
                    .iter()
                    .map(|i| {
                        vec![
                            i.identifier.clone(),
                            i.title.clone(),
                            relation_name(&i.state),
                            relation_name(&i.assignee),
                        ]
                    })
                    .collect();
                output::print_table(&["ID", "TITLE", "STATE", "ASSIGNEE"], rows);
            }
        }
        IssuesSubcommand::Count { filter } => {
            let issues = collect_issues(&client, &filter.to_filter(), IssueDepth::Slim).await?;
            if json {
                output::print_json(&serde_json::json!({ "count": issues.len() }))?;
            } else {
                println!("{}", issues.len());
            }
        }
    }
    Ok(())
}

fn relation_name(relation: &Option<linear_client::RelationRef>) -> String {
    relation
        .as_ref()
        .and_then(|r| r.name.clone())
        .unwrap_or_else(|| "-".to_string())
}
