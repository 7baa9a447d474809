//! Example to run the Ringside server standalone
//!
//! Run with: cargo run -p ringside-server --example run_server

use ringside_server::{run_server, ServerConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig {
        port: 5000,
        data_file: Some(PathBuf::from("boxers.json")),
        ..Default::default()
    };

    println!("Starting Ringside server on port {}", config.port);
    println!("Try: curl http://localhost:{}/api/health", config.port);

    run_server(config).await
}
