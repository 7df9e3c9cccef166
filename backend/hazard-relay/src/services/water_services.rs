//! Reshapes USGS water services instantaneous-values JSON into `FloodSite`s.
//!
//! Upstream layout (only the parts we read):
//! `value.timeSeries[].sourceInfo.{siteName, siteCode[0].value, geoLocation.geogLocation.{latitude, longitude}}`,
//! `value.timeSeries[].variable.unit.unitCode`, `value.timeSeries[].values[0].value[] {value, dateTime}`.

use hazard_feed_core::FloodSite;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RelayError;

pub const MAX_SITES: usize = 100;

/// USGS marks missing readings with this value.
const NO_DATA_SENTINEL: f64 = -999999.0;

#[derive(Deserialize)]
struct IvResponse {
    value: IvValue,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IvValue {
    #[serde(default)]
    time_series: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSeries {
    source_info: SourceInfo,
    variable: Option<Variable>,
    #[serde(default)]
    values: Vec<ValueBlock>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceInfo {
    site_name: Option<String>,
    #[serde(default)]
    site_code: Vec<SiteCode>,
    geo_location: Option<GeoLocation>,
}

#[derive(Deserialize)]
struct SiteCode {
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoLocation {
    geog_location: GeogLocation,
}

#[derive(Deserialize)]
struct GeogLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct Variable {
    unit: Option<Unit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Unit {
    unit_code: Option<String>,
}

#[derive(Deserialize)]
struct ValueBlock {
    #[serde(default)]
    value: Vec<Reading>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reading {
    value: Value,
    date_time: Option<String>,
}

/// Parse the upstream body into at most `MAX_SITES` sites. Series without a
/// usable latest reading or location are dropped.
pub fn reshape(body: &str) -> Result<Vec<FloodSite>, RelayError> {
    let response: IvResponse = serde_json::from_str(body).map_err(|e| RelayError::Parse {
        name: "flood",
        message: e.to_string(),
    })?;

    Ok(response
        .value
        .time_series
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<TimeSeries>(raw).ok())
        .filter_map(series_to_site)
        .take(MAX_SITES)
        .collect())
}

fn reading_value(reading: &Reading) -> Option<f64> {
    let value = match &reading.value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    (value.is_finite() && value != NO_DATA_SENTINEL).then_some(value)
}

fn series_to_site(series: TimeSeries) -> Option<FloodSite> {
    let site_code = series.source_info.site_code.first()?.value.clone();
    let location = series.source_info.geo_location?.geog_location;
    if !location.latitude.is_finite() || !location.longitude.is_finite() {
        return None;
    }

    // Readings are chronological; the last one is the current level.
    let latest = series.values.first()?.value.last()?;
    let water_level = reading_value(latest)?;

    let unit = series
        .variable
        .and_then(|v| v.unit)
        .and_then(|u| u.unit_code)
        .unwrap_or_else(|| "ft".to_string());

    Some(FloodSite {
        site_name: series
            .source_info
            .site_name
            .unwrap_or_else(|| site_code.clone()),
        site_code,
        lat: location.latitude,
        lng: location.longitude,
        water_level,
        unit,
        date_time: latest.date_time.clone(),
    })
}
