//! NWS active alerts (GeoJSON), read through the relay.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::api::get_text;
use crate::date;
use crate::error::Result;
use crate::models::{HazardEvent, HazardType};
use crate::sources::{HazardSource, MAX_EVENTS_PER_SOURCE};

/// Continental US centroid, used for zone-based alerts without a point geometry.
pub const ZONE_PLACEHOLDER: (f64, f64) = (40.0, -100.0);

const MAX_DESCRIPTION_CHARS: usize = 300;

#[derive(Deserialize)]
struct AlertCollection {
    #[serde(default)]
    features: Vec<Value>,
}

#[derive(Deserialize)]
struct AlertFeature {
    id: Option<String>,
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: AlertProperties,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    coordinates: Value,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AlertProperties {
    #[serde(rename = "@id")]
    at_id: Option<String>,
    event: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    sent: Option<String>,
    effective: Option<String>,
    area_desc: Option<String>,
    /// Zone URLs; only presence matters, so entries stay untyped.
    affected_zones: Option<Vec<Value>>,
}

pub struct WeatherSource {
    client: Client,
    url: String,
}

impl WeatherSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl HazardSource for WeatherSource {
    fn kind(&self) -> HazardType {
        HazardType::Weather
    }

    async fn fetch(&self) -> Result<Vec<HazardEvent>> {
        let body = get_text(&self.client, &self.url, "application/geo+json, application/json").await?;
        parse_weather_alerts(&body)
    }
}

/// NWS severity enum onto the marker scale.
pub fn alert_severity(severity: Option<&str>) -> f64 {
    match severity {
        Some("Extreme") => 5.0,
        Some("Severe") => 4.0,
        Some("Moderate") => 3.0,
        _ => 2.0,
    }
}

/// Cut to 300 characters and mark the cut with "...".
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Normalize the first 100 alerts of an NWS alert collection.
pub fn parse_weather_alerts(body: &str) -> Result<Vec<HazardEvent>> {
    let collection: AlertCollection = serde_json::from_str(body)?;
    Ok(collection
        .features
        .into_iter()
        .take(MAX_EVENTS_PER_SOURCE)
        .filter_map(|raw| serde_json::from_value::<AlertFeature>(raw).ok())
        .filter_map(alert_to_event)
        .collect())
}

fn point_of(geometry: &Geometry) -> Option<(f64, f64)> {
    if geometry.kind.as_deref() != Some("Point") {
        return None;
    }
    let coords = geometry.coordinates.as_array()?;
    let lng = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    Some((lat, lng))
}

fn alert_to_event(feature: AlertFeature) -> Option<HazardEvent> {
    let props = feature.properties;
    let (lat, lng) = match feature.geometry.as_ref().and_then(point_of) {
        Some(point) => point,
        None if props.affected_zones.as_ref().is_some_and(|z| !z.is_empty()) => ZONE_PLACEHOLDER,
        None => return None,
    };

    let title = props
        .event
        .clone()
        .or_else(|| props.headline.clone())
        .unwrap_or_else(|| "Weather Alert".to_string());
    let description = props
        .description
        .as_deref()
        .or(props.headline.as_deref())
        .or(props.area_desc.as_deref())
        .map(truncate_description)
        .unwrap_or_default();
    let when = date::or_now(
        props
            .sent
            .as_deref()
            .and_then(date::parse_loose)
            .or_else(|| props.effective.as_deref().and_then(date::parse_loose)),
    );
    let magnitude = alert_severity(props.severity.as_deref());

    HazardEvent::new(HazardType::Weather, title, description, lat, lng, magnitude, when)
        .map(|e| e.with_source("NWS").with_url(props.at_id.or(feature.id)))
}
