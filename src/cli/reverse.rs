//! Reverse command handler
//!
//! Resolves coordinates to a human-readable address.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::Geocoder;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(allow_hyphen_values = true)]
    pub lng: f64,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    Coordinates::new(args.lat, args.lng).validate()?;

    let config = Config::load()?;
    let geocoder = Geocoder::from_config(&config.geocoder)?;

    let lookup = geocoder.reverse_lookup(args.lat, args.lng).await;
    println!("{}", lookup.address);
    if !lookup.resolved {
        eprintln!("(no address found, showing coordinates)");
    }

    Ok(())
}
