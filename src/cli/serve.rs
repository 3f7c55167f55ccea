//! Serve command handler
//!
//! Starts the HTTP server (static bundle, geocoder proxy, snapshot API)
//! in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Directory with the frontend bundle
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Upstream geocoder for the /nominatim proxy
    #[arg(long)]
    pub geocoder: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    // Load and optionally override config
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = dir;
    }
    if let Some(url) = args.geocoder {
        config.set("geocoder.base_url", &url)?;
    }

    info!(
        "Starting activity-map server v{} on {} (geocoder: {})",
        env!("CARGO_PKG_VERSION"),
        config.server_addr(),
        config.geocoder.base_url
    );

    // Run the server
    server::run(config).await
}
