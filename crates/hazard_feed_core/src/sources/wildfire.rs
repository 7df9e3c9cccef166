//! NASA FIRMS satellite hotspot detections (CSV), read through the relay.

use csv::{ReaderBuilder, StringRecord, Trim};
use reqwest::Client;
use tracing::debug;

use crate::api::get_text;
use crate::date;
use crate::error::Result;
use crate::models::{HazardEvent, HazardType};
use crate::sources::{HazardSource, MAX_EVENTS_PER_SOURCE};

const MIN_SEVERITY: f64 = 2.0;
const MAX_SEVERITY: f64 = 5.0;

pub struct WildfireSource {
    client: Client,
    url: String,
}

impl WildfireSource {
    /// `url` may already carry `?apiKey=...`; otherwise the relay uses its own key.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl HazardSource for WildfireSource {
    fn kind(&self) -> HazardType {
        HazardType::Fire
    }

    async fn fetch(&self) -> Result<Vec<HazardEvent>> {
        let body = get_text(&self.client, &self.url, "text/csv").await?;
        Ok(parse_fire_csv(&body))
    }
}

/// Brightness temperature (Kelvin) mapped onto whole steps of the 2-5 marker scale.
pub fn fire_severity(brightness: f64) -> f64 {
    (brightness / 100.0).floor().clamp(MIN_SEVERITY, MAX_SEVERITY)
}

struct Columns {
    latitude: usize,
    longitude: usize,
    brightness: Option<usize>,
    acq_date: Option<usize>,
    acq_time: Option<usize>,
}

impl Columns {
    /// Columns are located by header name; FIRMS products order them differently.
    fn from_header(header: &StringRecord) -> Option<Self> {
        let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        Some(Self {
            latitude: find("latitude")?,
            longitude: find("longitude")?,
            brightness: find("bright_ti4"),
            acq_date: find("acq_date"),
            acq_time: find("acq_time"),
        })
    }
}

/// Parse a FIRMS CSV export. Returns no events when the header lacks
/// latitude/longitude. Only the first 100 data rows are read; the result is
/// sorted by severity, highest first.
pub fn parse_fire_csv(body: &str) -> Vec<HazardEvent> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let Some(columns) = reader.headers().ok().and_then(Columns::from_header) else {
        debug!("wildfire CSV has no latitude/longitude header");
        return Vec::new();
    };

    let mut events: Vec<HazardEvent> = reader
        .records()
        .take(MAX_EVENTS_PER_SOURCE)
        .filter_map(|row| match row {
            Ok(record) => row_to_event(&columns, &record),
            Err(e) => {
                debug!(error = %e, "skipping unreadable wildfire row");
                None
            }
        })
        .collect();

    events.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    events
}

fn row_to_event(columns: &Columns, record: &StringRecord) -> Option<HazardEvent> {
    let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).filter(|c| !c.is_empty());

    let lat: f64 = cell(Some(columns.latitude))?.parse().ok()?;
    let lng: f64 = cell(Some(columns.longitude))?.parse().ok()?;
    let brightness = cell(columns.brightness).and_then(|b| b.parse::<f64>().ok());
    let severity = brightness.map(fire_severity).unwrap_or(MIN_SEVERITY);
    let acq_date = cell(columns.acq_date);
    let when = date::or_now(acq_date.and_then(|d| date::parse_acquisition(d, cell(columns.acq_time))));

    let description = format!(
        "Satellite hotspot, brightness {} K, detected {}",
        brightness.map(|b| format!("{:.1}", b)).unwrap_or_else(|| "unknown".to_string()),
        acq_date.unwrap_or("recently"),
    );

    HazardEvent::new(HazardType::Fire, "Fire Hotspot", description, lat, lng, severity, when)
        .map(|e| e.with_source("NASA FIRMS"))
}
