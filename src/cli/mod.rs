//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod map;
pub mod pick;
pub mod reverse;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Location picker and task map tools for municipal activity management
#[derive(Parser)]
#[command(name = "activity-map")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the top match for a place name
    Search(search::SearchArgs),

    /// Resolve coordinates to an address
    Reverse(reverse::ReverseArgs),

    /// Render a task map from a JSON task list
    Map(map::MapArgs),

    /// Pick a location by search or by clicking a point
    Pick(pick::PickArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Map(args) => map::run(args),
        Commands::Pick(args) => pick::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
