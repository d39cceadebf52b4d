use anyhow::Result;
use argus_dashboard::dashboard::{Dashboard, DashboardEvent};
use argus_dashboard::environment::{self, ServerConfig};
use argus_dashboard::filter::{ClusterSelector, FilterState};
use argus_dashboard::logging;
use argus_dashboard::server;
use argus_dashboard::session::{self, HELP};
use argus_dashboard::source::DataSource;
use argus_dashboard::terminal::{TerminalCharts, TerminalView};
use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use tracing::error;

#[derive(Parser)]
#[clap(name = "dashboard", about = "News analysis dashboard")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and keep the dashboard in sync with typed commands
    Watch {
        /// Data endpoint (defaults to DASHBOARD_DATA_URL or the local server)
        #[clap(short, long)]
        url: Option<String>,
    },

    /// Load the dataset once and render the filtered dashboard
    Snapshot {
        /// Data endpoint (defaults to DASHBOARD_DATA_URL or the local server)
        #[clap(short, long)]
        url: Option<String>,

        /// Case-insensitive text to find in title or summary
        #[clap(short, long, default_value = "")]
        search: String,

        /// Topic cluster id, or "all"
        #[clap(short, long, default_value = "all")]
        cluster: String,

        /// Print the snapshot as JSON instead of drawing it
        #[clap(long)]
        json: bool,
    },

    /// Serve the analysis output file at /api/data
    Serve {
        /// JSON file produced by the data generation step
        #[clap(short, long)]
        data: Option<PathBuf>,

        /// Port to listen on
        #[clap(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args = Cli::parse();

    match args.command {
        Commands::Watch { url } => {
            let source = DataSource::new(environment::data_url(url.as_deref())?)?;
            let mut dashboard = Dashboard::new(TerminalCharts::stdout());
            let mut view = TerminalView::stdout();

            println!("{}", HELP);
            let input = BufReader::new(io::stdin());
            session::run_session(&mut dashboard, &mut view, source, input).await?;
        }
        Commands::Snapshot {
            url,
            search,
            cluster,
            json,
        } => {
            let source = DataSource::new(environment::data_url(url.as_deref())?)?;
            let dataset = match source.load().await {
                Ok(dataset) => dataset,
                Err(e) => {
                    error!("Failed to load dataset from {}: {}", source.url(), e);
                    eprintln!("{}", e.user_message());
                    process::exit(1);
                }
            };

            let filter = FilterState::new(search, ClusterSelector::parse(&cluster));
            let loaded = DashboardEvent::DataLoaded(Ok(dataset));

            if json {
                let mut dashboard = Dashboard::with_filter(TerminalCharts::new(io::sink()), filter);
                dashboard.handle(loaded, &mut TerminalView::new(io::sink()));
                println!("{}", serde_json::to_string_pretty(&dashboard.snapshot())?);
            } else {
                let mut dashboard = Dashboard::with_filter(TerminalCharts::stdout(), filter);
                dashboard.handle(loaded, &mut TerminalView::stdout());
            }
        }
        Commands::Serve { data, port } => {
            server::serve(ServerConfig::from_env(data, port)).await?;
        }
    }

    Ok(())
}
