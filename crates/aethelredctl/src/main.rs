//! Aethelred Control - CLI for the strategic advisory engine
//!
//! Runs one-shot advisory commands or an interactive session against
//! an in-memory [`aethelred_core::AdvisorSession`].

mod commands;
mod output;
mod repl;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "aethelredctl")]
#[command(about = "Aethelred - Strategic Advisory OS", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive advisory session
    Session,

    /// Ask the advisor a single question
    Chat {
        /// The question, as free text
        message: Vec<String>,
    },

    /// Run a predictive forecast over a conflict scenario
    Forecast {
        /// Scenario key (see `scenarios`)
        #[arg(long)]
        scenario: Option<String>,

        /// Months to project past the end of history
        #[arg(long)]
        horizon: Option<usize>,

        /// Write forecast data as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Run the full multi-agent strategic analysis
    Analyze {
        /// Scenario key (see `scenarios`)
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Show the commander profile and progression
    Profile,

    /// Show today's mission board
    Missions,

    /// Show the achievement gallery
    Achievements,

    /// List available conflict scenarios
    Scenarios,

    /// List problem-solving workflows
    Workflows,

    /// Show configuration, or write a default config file
    Config {
        /// Write a default config file to the user config path
        #[arg(long)]
        init: bool,
    },
}

fn init_logging() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Session) => repl::run(),
        Some(Commands::Chat { message }) => commands::chat(&message.join(" ")),
        Some(Commands::Forecast {
            scenario,
            horizon,
            export,
        }) => commands::forecast(scenario.as_deref(), horizon, export.as_deref()),
        Some(Commands::Analyze { scenario }) => commands::analyze(scenario.as_deref()),
        Some(Commands::Profile) => commands::profile(),
        Some(Commands::Missions) => commands::missions(),
        Some(Commands::Achievements) => commands::achievements(),
        Some(Commands::Scenarios) => commands::scenarios(),
        Some(Commands::Workflows) => commands::workflows(),
        Some(Commands::Config { init }) => commands::config(init),
    }
}
