mod commands;
mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "roster-cycles")]
#[command(about = "Publish the 28-day roster cycle calendar as an iCalendar feed")]
struct Cli {
    /// Settings file (defaults to ~/.config/roster-cycles/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the feed over HTTP (default)
    Serve {
        /// Listen address, overriding the settings
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Write a single feed to stdout
    Print {
        /// Generate the feed for this date (YYYY-MM-DD) instead of today
        #[arg(long, value_parser = parse_today)]
        today: Option<NaiveDate>,
    },
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    roster_core::config::parse_date(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `print` output stays a clean feed
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_cycles=info,roster_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => commands::serve::run(settings, bind).await,
        Commands::Print { today } => commands::print::run(settings, today),
    }
}
