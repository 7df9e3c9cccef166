use std::env;

const DEFAULT_USER_AGENT: &str = "hazard-relay/0.1 (disaster relief coordination; contact: ops@relief.local)";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Sent on every upstream request; NWS rejects requests without one.
    pub user_agent: String,
    /// Server-side fallback when `/api/proxy/wildfire` is called without `apiKey`.
    pub firms_api_key: Option<String>,
    pub tsunami_feed_url: String,
    pub firms_api_url: String,
    pub nws_alerts_url: String,
    pub water_services_url: String,
    pub flood_state_code: String,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            user_agent: env::var("RELAY_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            firms_api_key: env::var("FIRMS_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            tsunami_feed_url: env::var("TSUNAMI_FEED_URL")
                .unwrap_or_else(|_| "https://www.tsunami.gov/events/xml/PAAQAtom.xml".to_string()),
            firms_api_url: env::var("FIRMS_API_URL")
                .unwrap_or_else(|_| "https://firms.modaps.eosdis.nasa.gov/api/area/csv".to_string()),
            nws_alerts_url: env::var("NWS_ALERTS_URL")
                .unwrap_or_else(|_| "https://api.weather.gov/alerts/active".to_string()),
            water_services_url: env::var("WATER_SERVICES_URL")
                .unwrap_or_else(|_| "https://waterservices.usgs.gov/nwis/iv/".to_string()),
            flood_state_code: env::var("FLOOD_STATE_CODE")
                .unwrap_or_else(|_| "ny".to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}
