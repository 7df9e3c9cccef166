//! Merges every hazard source into one feed with a provenance string.

use chrono::Local;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::FeedEndpoints;
use crate::error::Result;
use crate::models::{AggregatedFeed, HazardEvent, HazardType};
use crate::sources::{
    EarthquakeSource, FloodSource, HazardSource, TsunamiSource, WeatherSource, WildfireSource,
};

/// en-US style "11/14/2023, 5:13:20 PM".
const DISPLAY_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub struct Aggregator {
    earthquakes: EarthquakeSource,
    tsunamis: TsunamiSource,
    wildfires: WildfireSource,
    weather: WeatherSource,
    floods: FloodSource,
}

impl Aggregator {
    pub fn new(client: Client, endpoints: FeedEndpoints) -> Self {
        Self {
            earthquakes: EarthquakeSource::new(client.clone(), endpoints.earthquake),
            tsunamis: TsunamiSource::new(client.clone(), endpoints.tsunami),
            wildfires: WildfireSource::new(client.clone(), endpoints.wildfire),
            weather: WeatherSource::new(client.clone(), endpoints.weather),
            floods: FloodSource::new(client, endpoints.flood),
        }
    }

    /// Fresh fetch from every source.
    ///
    /// Requests run concurrently but results are folded in a fixed order, so
    /// `sources` always lists labels as earthquake, tsunami, wildfire, weather,
    /// flood. Earthquakes are the anchor source: their failure fails the whole
    /// pass. Any other failing source is logged and left out.
    pub async fn fetch_all(&self) -> Result<AggregatedFeed> {
        let (earthquakes, tsunamis, wildfires, weather, floods) = tokio::join!(
            self.earthquakes.fetch(),
            self.tsunamis.fetch(),
            self.wildfires.fetch(),
            self.weather.fetch(),
            self.floods.fetch(),
        );

        let mut events = earthquakes?;
        let mut sources = vec![HazardType::Earthquake.label()];

        let optional = [
            (HazardType::Tsunami, tsunamis),
            (HazardType::Fire, wildfires),
            (HazardType::Weather, weather),
            (HazardType::Flood, floods),
        ];
        for (kind, result) in optional {
            match result {
                Ok(batch) => {
                    events.extend(batch);
                    sources.push(kind.label());
                }
                Err(e) => warn!(source = kind.label(), error = %e, "skipping hazard source"),
            }
        }

        info!(events = events.len(), sources = sources.len(), "hazard feed aggregated");
        Ok(AggregatedFeed {
            events,
            sources: sources.join(", "),
            timestamp: Local::now().format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Each source on its own, failures already flattened to empty lists.
    pub async fn fetch_each_or_empty(&self) -> Vec<(HazardType, Vec<HazardEvent>)> {
        let (earthquakes, tsunamis, wildfires, weather, floods) = tokio::join!(
            self.earthquakes.fetch_or_empty(),
            self.tsunamis.fetch_or_empty(),
            self.wildfires.fetch_or_empty(),
            self.weather.fetch_or_empty(),
            self.floods.fetch_or_empty(),
        );
        vec![
            (HazardType::Earthquake, earthquakes),
            (HazardType::Tsunami, tsunamis),
            (HazardType::Fire, wildfires),
            (HazardType::Weather, weather),
            (HazardType::Flood, floods),
        ]
    }
}
