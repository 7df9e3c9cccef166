//! USGS earthquake summary feed (GeoJSON), fetched directly.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::get_text;
use crate::date;
use crate::error::{FeedError, Result};
use crate::models::{HazardEvent, HazardType};
use crate::sources::HazardSource;

const DEFAULT_MAGNITUDE: f64 = 1.0;

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Value>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Option<QuakeProperties>,
    geometry: Option<PointGeometry>,
}

#[derive(Deserialize, Default)]
struct QuakeProperties {
    mag: Option<Value>,
    place: Option<String>,
    time: Option<Value>,
    title: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct PointGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

pub struct EarthquakeSource {
    client: Client,
    urls: Vec<String>,
}

impl EarthquakeSource {
    /// `urls` are tried in order: hourly, daily, then significant past week.
    pub fn new(client: Client, urls: Vec<String>) -> Self {
        Self { client, urls }
    }
}

impl HazardSource for EarthquakeSource {
    fn kind(&self) -> HazardType {
        HazardType::Earthquake
    }

    async fn fetch(&self) -> Result<Vec<HazardEvent>> {
        let mut last_error: Option<FeedError> = None;
        for url in &self.urls {
            let fetched = get_text(&self.client, url, "application/geo+json, application/json")
                .await
                .and_then(|body| parse_earthquakes(&body));
            match fetched {
                Ok(events) => return Ok(events),
                Err(e) => {
                    info!(url = %url, error = %e, "earthquake endpoint failed, trying next");
                    last_error = Some(e);
                }
            }
        }
        Err(FeedError::AllEndpointsFailed(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no earthquake endpoints configured".to_string()),
        ))
    }
}

/// Normalize a USGS GeoJSON feature collection. GeoJSON stores `[lng, lat, depth]`.
pub fn parse_earthquakes(body: &str) -> Result<Vec<HazardEvent>> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let total = collection.features.len();
    let events: Vec<HazardEvent> = collection
        .features
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<Feature>(raw).ok())
        .filter_map(feature_to_event)
        .collect();
    if events.len() < total {
        debug!(skipped = total - events.len(), "dropped malformed earthquake features");
    }
    Ok(events)
}

fn feature_to_event(feature: Feature) -> Option<HazardEvent> {
    let coordinates = feature.geometry?.coordinates;
    let (lng, lat) = match coordinates.as_slice() {
        [lng, lat, ..] => (*lng, *lat),
        _ => return None,
    };
    let props = feature.properties.unwrap_or_default();
    let magnitude = props
        .mag
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|m| m.is_finite())
        .unwrap_or(DEFAULT_MAGNITUDE);
    let place = props
        .place
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "Unknown location".to_string());
    let title = props
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("M{:.1} - {}", magnitude, place));
    let when = date::or_now(
        props
            .time
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|t| t.is_finite())
            .and_then(|t| date::from_epoch_millis(t as i64)),
    );

    HazardEvent::new(HazardType::Earthquake, title, place, lat, lng, magnitude, when)
        .map(|e| e.with_source("USGS").with_url(props.url))
}
