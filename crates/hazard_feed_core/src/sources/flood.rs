//! River gauge flood status, read through the relay's reshaped USGS water services data.

use reqwest::Client;
use serde_json::Value;

use crate::api::get_text;
use crate::date;
use crate::error::Result;
use crate::models::{flood_stage, FloodSite, HazardEvent, HazardType};
use crate::sources::{HazardSource, MAX_EVENTS_PER_SOURCE};

pub struct FloodSource {
    client: Client,
    url: String,
}

impl FloodSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl HazardSource for FloodSource {
    fn kind(&self) -> HazardType {
        HazardType::Flood
    }

    async fn fetch(&self) -> Result<Vec<HazardEvent>> {
        let body = get_text(&self.client, &self.url, "application/json").await?;
        parse_flood_sites(&body)
    }
}

/// Normalize the relay's `{"sites": [...]}` payload, capped at 100 sites.
pub fn parse_flood_sites(body: &str) -> Result<Vec<HazardEvent>> {
    let raw: Value = serde_json::from_str(body)?;
    let sites = raw
        .get("sites")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(sites
        .into_iter()
        .filter_map(|v| serde_json::from_value::<FloodSite>(v).ok())
        .filter_map(site_to_event)
        .take(MAX_EVENTS_PER_SOURCE)
        .collect())
}

fn site_to_event(site: FloodSite) -> Option<HazardEvent> {
    if !site.water_level.is_finite() {
        return None;
    }
    let stage = flood_stage(site.water_level);
    let unit = if site.unit.is_empty() { "ft" } else { site.unit.as_str() };
    let title = format!("{}: {}", stage.status, site.site_name);
    let description = format!(
        "Water level {:.2} {} at {} (site {})",
        site.water_level, unit, site.site_name, site.site_code
    );
    let when = date::or_now(site.date_time.as_deref().and_then(date::parse_loose));
    let url = Some(format!(
        "https://waterdata.usgs.gov/monitoring-location/{}/",
        site.site_code
    ));

    HazardEvent::new(
        HazardType::Flood,
        title,
        description,
        site.lat,
        site.lng,
        f64::from(stage.severity),
        when,
    )
    .map(|e| e.with_source("USGS Water Services").with_url(url))
}
