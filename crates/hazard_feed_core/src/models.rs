//! Data models for normalized hazard events and the relay wire shapes.
//! Events are rebuilt on every aggregation pass; nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hazard categories. Serialized lowercase to match the map's marker keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    Earthquake,
    Tsunami,
    Fire,
    Weather,
    Flood,
}

impl HazardType {
    pub const ALL: [HazardType; 5] = [
        HazardType::Earthquake,
        HazardType::Tsunami,
        HazardType::Fire,
        HazardType::Weather,
        HazardType::Flood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardType::Earthquake => "earthquake",
            HazardType::Tsunami => "tsunami",
            HazardType::Fire => "fire",
            HazardType::Weather => "weather",
            HazardType::Flood => "flood",
        }
    }

    /// Provenance label used in the aggregated `sources` string.
    pub fn label(&self) -> &'static str {
        match self {
            HazardType::Earthquake => "USGS Earthquakes",
            HazardType::Tsunami => "NOAA Tsunamis",
            HazardType::Fire => "NASA FIRMS Wildfires",
            HazardType::Weather => "NOAA Weather",
            HazardType::Flood => "USGS Water Services",
        }
    }
}

/// A single normalized hazard ready for map rendering.
///
/// `magnitude` is a per-type sizing hint (Richter for earthquakes, a fixed
/// constant for tsunamis, band levels for the rest). Do not compare it across
/// different `hazard_type` values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub magnitude: f64,
    #[serde(with = "crate::date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl HazardEvent {
    /// Returns `None` when either coordinate is not finite; such events can't be placed on the map.
    pub fn new(
        hazard_type: HazardType,
        title: impl Into<String>,
        description: impl Into<String>,
        lat: f64,
        lng: f64,
        magnitude: f64,
        date: DateTime<Utc>,
    ) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Self {
            id: format!("{}-{}", hazard_type.as_str(), Uuid::new_v4()),
            title: title.into(),
            description: description.into(),
            lat,
            lng,
            magnitude,
            date,
            hazard_type,
            source: None,
            url: None,
        })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url.filter(|u| !u.is_empty());
        self
    }
}

/// Simplified site status produced by the flood relay from USGS water services data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodSite {
    pub site_code: String,
    pub site_name: String,
    pub lat: f64,
    pub lng: f64,
    pub water_level: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
}

/// Envelope returned by `/api/proxy/flood`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FloodSitesResponse {
    #[serde(default)]
    pub sites: Vec<FloodSite>,
    #[serde(default)]
    pub count: usize,
}

/// Flood severity band for a water level reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloodStage {
    pub severity: u8,
    pub status: &'static str,
}

/// Classify a water level into a 1-5 band. Bands are checked highest first.
pub fn flood_stage(water_level: f64) -> FloodStage {
    const BANDS: [(f64, u8, &str); 4] = [
        (20.0, 5, "Major Flooding"),
        (15.0, 4, "Moderate Flooding"),
        (10.0, 3, "Minor Flooding"),
        (7.0, 2, "Near Flood Stage"),
    ];

    BANDS
        .iter()
        .find(|(threshold, _, _)| water_level > *threshold)
        .map(|&(_, severity, status)| FloodStage { severity, status })
        .unwrap_or(FloodStage {
            severity: 1,
            status: "Normal",
        })
}

/// Result of one aggregation pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregatedFeed {
    pub events: Vec<HazardEvent>,
    /// Comma separated labels of the sources that contributed, in fixed order.
    pub sources: String,
    /// Display-formatted local time of completion. Use per-event `date` for machine time.
    pub timestamp: String,
}
