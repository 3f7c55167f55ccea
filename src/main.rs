//! activity-map CLI entry point
//!
//! Location picker, task map and geocoder proxy - CLI + web server

use activity_map::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
