mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sitecredits_core::updater::{DEFAULT_CATALOG_PATH, DEFAULT_HTML_PATH};
use sitecredits_core::{CreditsUpdater, Strategy, UpdaterConfig};

#[derive(Parser)]
#[command(
    name = "sitecredits",
    about = "Merge creator credits from a saved showcase page into a site catalog"
)]
struct Cli {
    /// Saved showcase HTML page
    #[arg(long, global = true, default_value = DEFAULT_HTML_PATH)]
    html: PathBuf,
    /// Site catalog JSON, rewritten in place
    #[arg(long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
    /// Match and report without writing the catalog
    #[arg(long, global = true)]
    dry_run: bool,
    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match credits to catalog entries by title
    ByTitle,
    /// Match credits to catalog entries by project URL
    ByUrl,
    /// Print extracted credits without touching the catalog
    Extract {
        #[arg(long, value_enum, default_value_t = StrategyArg::Title)]
        strategy: StrategyArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Title,
    Url,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Title => Strategy::ByTitle,
            StrategyArg::Url => Strategy::ByUrl,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let updater = CreditsUpdater::with_config(UpdaterConfig {
        html_path: cli.html,
        catalog_path: cli.catalog,
        dry_run: cli.dry_run,
    });

    match cli.command {
        Commands::ByTitle => commands::update(&updater, Strategy::ByTitle, cli.json),
        Commands::ByUrl => commands::update(&updater, Strategy::ByUrl, cli.json),
        Commands::Extract { strategy } => commands::extract(&updater, strategy.into()),
    }
}
