//! Server command - start the HTTP API
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to ringside-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use ringside_server::{run_server, ServerConfig};

use crate::PolicyArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "5000")]
    pub port: u16,

    /// JSON file the boxers are loaded from and saved to
    #[arg(long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args, seed)?;

    tracing::info!("Starting Ringside server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    if let Some(path) = &args.data_file {
        validate_data_file(path)?;
    }

    Ok(ServerConfig {
        port: args.port,
        data_file: args.data_file.clone(),
        seed,
        policy: args.policy.to_policy()?,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that the data file, if present, is a regular file
fn validate_data_file(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::info!(
            "Data file {} does not exist yet; starting with no boxers",
            path.display()
        );
    } else if !path.is_file() {
        anyhow::bail!("Data path exists but is not a file: {}", path.display());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
