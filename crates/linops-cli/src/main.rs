mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use cmd::issues::IssuesSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "linops",
    about = "Linear workspace tooling — reports, exports, and a webhook relay",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./linops.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the authenticated user (validates the API key)
    Viewer,

    /// List teams in the workspace
    Teams,

    /// List or count issues
    Issues {
        #[command(subcommand)]
        subcommand: IssuesSubcommand,
    },

    /// Create an issue
    Create {
        /// Team key (e.g. ENG)
        #[arg(long)]
        team: String,

        /// Issue title
        #[arg(long)]
        title: String,

        /// Issue description (Markdown)
        #[arg(long)]
        description: Option<String>,

        /// Priority: 0 none, 1 urgent, 2 high, 3 normal, 4 low
        #[arg(long)]
        priority: Option<u8>,
    },

    /// Produce a workspace snapshot report
    Snapshot {
        /// Write the Markdown report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write the flattened issue table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Bound on simultaneous relation fetches
        #[arg(long)]
        concurrency: Option<usize>,

        /// Restrict to one team key
        #[arg(long)]
        team: Option<String>,

        /// Include archived issues
        #[arg(long)]
        include_archived: bool,
    },

    /// Export customer requests to CSV, optionally running the analyzer
    Export {
        /// Label that marks a customer request
        #[arg(long, default_value = "customer-request")]
        label: String,

        /// Restrict to one team key
        #[arg(long)]
        team: Option<String>,

        /// Output CSV path
        #[arg(long, default_value = "requests.csv")]
        out: PathBuf,

        /// Run the clustering analyzer on the exported CSV
        #[arg(long)]
        analyze: bool,

        /// Python interpreter for the analyzer
        #[arg(long)]
        python: Option<String>,

        /// Analyzer script path
        #[arg(long)]
        script: Option<String>,
    },

    /// Run the webhook relay server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3456")]
        port: u16,

        /// Env var holding the webhook signing secret
        #[arg(long)]
        secret_env: Option<String>,

        /// Downstream URL deliveries are relayed to
        #[arg(long)]
        forward_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = run(cli).await;
    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Viewer => cmd::viewer::run(&config, cli.json).await,
        Commands::Teams => cmd::teams::run(&config, cli.json).await,
        Commands::Issues { subcommand } => cmd::issues::run(&config, subcommand, cli.json).await,
        Commands::Create {
            team,
            title,
            description,
            priority,
        } => {
            cmd::create::run(
                &config,
                &team,
                &title,
                description.as_deref(),
                priority,
                cli.json,
            )
            .await
        }
        Commands::Snapshot {
            out,
            csv,
            concurrency,
            team,
            include_archived,
        } => {
            cmd::snapshot::run(
                &config,
                cmd::snapshot::SnapshotArgs {
                    out: out.as_deref(),
                    csv: csv.as_deref(),
                    concurrency,
                    team,
                    include_archived,
                },
                cli.json,
            )
            .await
        }
        Commands::Export {
            label,
            team,
            out,
            analyze,
            python,
            script,
        } => {
            cmd::export::run(
                &config,
                cmd::export::ExportArgs {
                    label,
                    team,
                    out: &out,
                    analyze,
                    python,
                    script,
                },
            )
            .await
        }
        Commands::Serve {
            port,
            secret_env,
            forward_url,
        } => cmd::serve::run(&config, port, secret_env, forward_url).await,
    }
}
