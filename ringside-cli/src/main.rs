//! Ringside CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API
//! - bout: Resolve bouts between two boxers offline

mod bout;
mod server;

use clap::{Args, Parser, Subcommand};
use ringside_core::FightPolicy;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ringside")]
#[command(about = "Boxing match engine and leaderboard")]
struct Cli {
    /// Seed for fight draws (default: entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(server::ServerArgs),
    /// Resolve bouts between two boxers
    Bout(bout::BoutArgs),
}

/// Fight eligibility flags shared by all commands
#[derive(Args, Clone, Debug)]
pub struct PolicyArgs {
    /// Minimum weight to enter the ring
    #[arg(long, default_value = "125")]
    pub min_weight: f64,

    /// Youngest age allowed to fight
    #[arg(long, default_value = "18")]
    pub min_age: u32,

    /// Oldest age allowed to fight
    #[arg(long, default_value = "40")]
    pub max_age: u32,
}

impl PolicyArgs {
    pub fn to_policy(&self) -> anyhow::Result<FightPolicy> {
        // A NaN minimum would make every weight comparison false
        if !self.min_weight.is_finite() || self.min_weight <= 0.0 {
            anyhow::bail!(
                "--min-weight must be a positive number, got {}",
                self.min_weight
            );
        }
        if self.min_age > self.max_age {
            anyhow::bail!(
                "--min-age ({}) must not exceed --max-age ({})",
                self.min_age,
                self.max_age
            );
        }
        Ok(FightPolicy {
            min_weight: self.min_weight,
            min_age: self.min_age,
            max_age: self.max_age,
        })
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr (RUST_LOG overrides the default filter)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Bout(args) => bout::run(args, cli.seed),
    }
}
