use std::env;

pub const EARTHQUAKE_HOURLY_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson";
pub const EARTHQUAKE_DAILY_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
pub const EARTHQUAKE_SIGNIFICANT_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/significant_week.geojson";

const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8000";

/// Where each fetcher reads from. Earthquakes go straight to USGS (it allows
/// cross-origin access); everything else goes through the relay.
#[derive(Clone, Debug)]
pub struct FeedEndpoints {
    /// Tried in order until one answers with 2xx.
    pub earthquake: Vec<String>,
    pub tsunami: String,
    pub wildfire: String,
    pub weather: String,
    pub flood: String,
}

impl FeedEndpoints {
    pub fn via_relay(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            earthquake: vec![
                EARTHQUAKE_HOURLY_URL.to_string(),
                EARTHQUAKE_DAILY_URL.to_string(),
                EARTHQUAKE_SIGNIFICANT_URL.to_string(),
            ],
            tsunami: format!("{}/api/proxy/tsunami", base),
            wildfire: format!("{}/api/proxy/wildfire", base),
            weather: format!("{}/api/proxy/weather", base),
            flood: format!("{}/api/proxy/flood", base),
        }
    }

    pub fn from_env() -> Self {
        let base = env::var("HAZARD_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
        Self::via_relay(&base)
    }

    pub fn with_earthquake(mut self, urls: Vec<String>) -> Self {
        self.earthquake = urls;
        self
    }
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self::via_relay(DEFAULT_RELAY_URL)
    }
}
