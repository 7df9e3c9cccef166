//! Same-origin passthroughs for feeds the browser can't call cross-origin.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::error::RelayError;
use crate::AppState;

const DEFAULT_FIRMS_SOURCE: &str = "VIIRS_SNPP_NRT";
const DEFAULT_FIRMS_AREA: &str = "world";
const DEFAULT_FIRMS_DAYS: u8 = 1;
/// FIRMS area queries accept a day range of 1..=10.
const MAX_FIRMS_DAYS: u8 = 10;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WildfireQuery {
    pub api_key: Option<String>,
    pub source: Option<String>,
    pub area: Option<String>,
    pub days: Option<String>,
}

// GET /api/proxy/tsunami - NOAA Atom feed, relayed as raw XML
pub async fn tsunami(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, RelayError> {
    let upstream = state
        .upstream
        .get(
            "tsunami",
            &state.config.tsunami_feed_url,
            &params,
            "application/atom+xml, application/xml, text/xml",
        )
        .await?;

    Ok(([(header::CONTENT_TYPE, "application/xml")], upstream.body).into_response())
}

// GET /api/proxy/weather - NWS active alerts, relayed as JSON
pub async fn weather(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, RelayError> {
    let upstream = state
        .upstream
        .get(
            "weather",
            &state.config.nws_alerts_url,
            &params,
            "application/geo+json",
        )
        .await?;

    let alerts = serde_json::from_str(&upstream.body).map_err(|e| RelayError::Parse {
        name: "weather",
        message: e.to_string(),
    })?;
    Ok(Json(alerts))
}

// GET /api/proxy/wildfire?apiKey=&source=&area=&days= - NASA FIRMS hotspots, relayed as raw CSV
pub async fn wildfire(
    State(state): State<AppState>,
    Query(params): Query<WildfireQuery>,
) -> Result<Response, RelayError> {
    let api_key = params
        .api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| state.config.firms_api_key.clone())
        .ok_or(RelayError::MissingApiKey)?;

    let source = params.source.unwrap_or_else(|| DEFAULT_FIRMS_SOURCE.to_string());
    let area = params.area.unwrap_or_else(|| DEFAULT_FIRMS_AREA.to_string());
    let days = firms_days(params.days.as_deref())?.to_string();
    let url = firms_url(&state.config.firms_api_url, &[&api_key, &source, &area, &days])?;

    let upstream = state
        .upstream
        .get("wildfire", url.as_str(), &[], "text/csv")
        .await?;

    Ok(([(header::CONTENT_TYPE, "text/csv")], upstream.body).into_response())
}

fn firms_days(raw: Option<&str>) -> Result<u8, RelayError> {
    let Some(raw) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(DEFAULT_FIRMS_DAYS);
    };
    raw.parse::<u8>()
        .ok()
        .filter(|d| (1..=MAX_FIRMS_DAYS).contains(d))
        .ok_or_else(|| {
            RelayError::InvalidQuery(format!(
                "days must be a whole number from 1 to {}, got {:?}",
                MAX_FIRMS_DAYS, raw
            ))
        })
}

/// FIRMS takes its parameters as path segments: `{base}/{key}/{source}/{area}/{days}`.
fn firms_url(base: &str, segments: &[&str]) -> Result<reqwest::Url, RelayError> {
    let invalid = |message: String| RelayError::Parse {
        name: "wildfire",
        message,
    };
    let mut url = reqwest::Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid(format!("{} cannot take path segments", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
