//! # Web Server Binary Entry Point
//!
//! Hosts the steganography HTTP API and, optionally, a static front-end.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin web_server -- --config config/web_server.toml
//! ```
//!
//! Without `--config` the built-in defaults are used (127.0.0.1:3000,
//! 5 MiB uploads, no static directory).

use clap::Parser;
use log::info;
use std::sync::Arc;

use modular_stego::common::config::{load_config, WebServerConfig};
use modular_stego::common::logging::init_logger;
use modular_stego::server::{router, AppState, StegoService};

/// Command-line arguments for the web server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the server configuration file (TOML format)
    ///
    /// Example: config/web_server.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Override the listen address from the configuration
    #[arg(long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config: WebServerConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => WebServerConfig::default(),
    };
    if let Some(address) = args.address {
        config.server.address = address;
    }

    init_logger(&config.logging.level);

    info!("🚀 Initializing web server...");

    let state = Arc::new(AppState {
        service: StegoService::new(config.limits),
    });
    let app = router(state, config.server.static_dir.as_deref());

    let addr = config.server.address.as_str();
    info!("🌐 Web server running on http://{}", addr);
    info!("📡 API endpoints: /api/encode, /api/decode, /api/params/check, /api/letters");
    if let Some(dir) = &config.server.static_dir {
        info!("📁 Serving static files from {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
