//! Pick command handler
//!
//! Drives the location picker headlessly: either types a search query and
//! waits out the debounce, or clicks a point and resolves its address.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoPoint, Geocoder};
use crate::map::{HeadlessEngine, MapEvent};
use crate::picker::LocationPicker;
use clap::{ArgGroup, Args};
use std::time::Instant;
use tracing::info;

/// Pick command arguments
#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["query", "at"])))]
pub struct PickArgs {
    /// Search for a place and select the top match
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Click the map at LAT LNG
    #[arg(long, num_args = 2, value_names = ["LAT", "LNG"], allow_negative_numbers = true)]
    pub at: Option<Vec<f64>>,

    /// Prior selection as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    pub from: Option<Coordinates>,
}

/// Run the pick command
pub async fn run(args: PickArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = Geocoder::from_config(&config.geocoder)?;

    let selection = pick(&config, &geocoder, &args).await?;

    match selection {
        Some(point) => println!("{}", serde_json::to_string_pretty(&point)?),
        None => println!("No selection"),
    }

    Ok(())
}

/// Run one pick interaction, returning the final selection
async fn pick<B: GeoBackend>(
    config: &Config,
    geocoder: &Geocoder<B>,
    args: &PickArgs,
) -> Result<Option<GeoPoint>> {
    let initial = args
        .from
        .map(|from| GeoPoint::new(from.lat, from.lng, None));

    let mut picker = LocationPicker::mount(HeadlessEngine::new(), config, initial, |selection| {
        if let Some(point) = selection {
            info!(location = %point.label(), "Location selected");
        }
    });

    if let Some(at) = &args.at {
        let [lat, lng] = at.as_slice() else {
            return Err(Error::InvalidCoordinates("--at takes LAT LNG".to_string()));
        };
        let position = Coordinates::new(*lat, *lng);
        position.validate()?;

        if let Some(request) = picker.handle_event(MapEvent::Click { position }) {
            let lookup = geocoder.reverse_lookup(position.lat, position.lng).await;
            picker.complete_click(request, lookup);
        }
    } else if let Some(query) = &args.query {
        picker.type_text(query, Instant::now());

        if let Some(deadline) = picker.next_search_deadline() {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        if !picker.run_pending_search(geocoder, Instant::now()).await {
            info!(query = %query, "No location found for query");
        }
    }

    Ok(picker.selection().cloned())
}
