use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    response::Json,
};
use hazard_feed_core::FloodSitesResponse;

use crate::error::RelayError;
use crate::services::water_services;
use crate::AppState;

/// USGS parameter code for gage height (stage), in feet.
const PARAM_STAGE: &str = "00065";

// GET /api/proxy/flood?stateCd= - USGS gauge heights reshaped into site statuses
pub async fn flood(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<FloodSitesResponse>, RelayError> {
    let mut query: BTreeMap<String, String> = BTreeMap::from([
        ("format".to_string(), "json".to_string()),
        ("parameterCd".to_string(), PARAM_STAGE.to_string()),
        ("siteStatus".to_string(), "active".to_string()),
        ("stateCd".to_string(), state.config.flood_state_code.clone()),
    ]);
    // Caller-supplied parameters win over the defaults
    query.extend(params);
    let query: Vec<(String, String)> = query.into_iter().collect();

    let upstream = state
        .upstream
        .get(
            "flood",
            &state.config.water_services_url,
            &query,
            "application/json",
        )
        .await?;

    let sites = water_services::reshape(&upstream.body)?;
    tracing::debug!("Flood relay reshaped {} sites", sites.len());

    Ok(Json(FloodSitesResponse {
        count: sites.len(),
        sites,
    }))
}
