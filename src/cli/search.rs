//! Search command handler
//!
//! Resolves a place name to its top match inside the configured area.

use crate::config::Config;
use crate::error::Result;
use crate::geo::Geocoder;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text place name or address
    pub query: String,

    /// Print the match as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = Geocoder::from_config(&config.geocoder)?;

    match geocoder.forward_search(&args.query).await {
        Some(result) if args.json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(result) => {
            println!("{}", result.display_name);
            println!("{}", result.coordinates());
        }
        None => {
            println!("No match");
        }
    }

    Ok(())
}
