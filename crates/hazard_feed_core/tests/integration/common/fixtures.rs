//! Canned upstream payloads and helpers wiring them into a fake upstream.

use std::time::Duration;

use hazard_feed_core::{build_client, Aggregator, FeedEndpoints};
use reqwest::Client;

use super::fake_upstream::{Canned, FakeUpstream};

pub const EQ_HOUR: &str = "/eq/all_hour.geojson";
pub const EQ_DAY: &str = "/eq/all_day.geojson";
pub const EQ_WEEK: &str = "/eq/significant_week.geojson";
pub const TSUNAMI: &str = "/api/proxy/tsunami";
pub const WILDFIRE: &str = "/api/proxy/wildfire";
pub const WEATHER: &str = "/api/proxy/weather";
pub const FLOOD: &str = "/api/proxy/flood";

pub const EARTHQUAKES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "us7000a",
     "properties": {"mag": 6.2, "place": "X", "time": 1700000000000, "url": "https://earthquake.usgs.gov/a"},
     "geometry": {"type": "Point", "coordinates": [10, 20, 5]}},
    {"type": "Feature", "id": "us7000b",
     "properties": {"mag": null, "place": "Y", "time": "soon"},
     "geometry": {"type": "Point", "coordinates": [-150.1, 61.2, 30]}},
    {"type": "Feature", "id": "broken", "properties": {"mag": 4.0}, "geometry": null}
  ]
}"#;

pub const TSUNAMI_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:georss="http://www.georss.org/georss">
  <title>NOAA Tsunami Warnings</title>
  <entry>
    <title>Tsunami Warning - Alaska</title>
    <summary>A tsunami warning is in effect</summary>
    <published>2024-01-05T03:00:00Z</published>
    <georss:point>57.0 -152.0</georss:point>
  </entry>
</feed>"#;

pub const FIRE_CSV: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time\n\
34.1,-118.2,250,0.4,0.4,2024-08-01,0930\n\
36.5,-121.9,1000,0.4,0.4,2024-08-01,0931\n\
bad,-121.9,400,0.4,0.4,2024-08-01,0932\n";

pub const WEATHER_ALERTS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"id": "https://api.weather.gov/alerts/1",
     "geometry": {"type": "Point", "coordinates": [-97.5, 35.4]},
     "properties": {"event": "Tornado Warning", "severity": "Extreme",
                    "description": "Take shelter", "sent": "2024-05-20T18:00:00-05:00"}},
    {"id": "https://api.weather.gov/alerts/2", "geometry": null,
     "properties": {"event": "Heat Advisory", "severity": "Moderate",
                    "affectedZones": ["https://api.weather.gov/zones/forecast/AZZ001"]}},
    {"id": "https://api.weather.gov/alerts/3", "geometry": null,
     "properties": {"event": "Nowhere Advisory", "severity": "Minor"}}
  ]
}"#;

pub const FLOOD_SITES: &str = r#"{"sites": [
  {"siteCode": "01358000", "siteName": "Hudson River at Green Island", "lat": 42.75, "lng": -73.69,
   "waterLevel": 22.0, "unit": "ft", "dateTime": "2024-04-02T08:15:00.000-04:00"},
  {"siteCode": "01357500", "siteName": "Mohawk River at Cohoes", "lat": 42.78, "lng": -73.71,
   "waterLevel": 3.0, "unit": "ft"}
], "count": 2}"#;

pub fn test_client() -> Client {
    build_client(Duration::from_secs(5)).expect("client")
}

pub fn endpoints(upstream: &FakeUpstream) -> FeedEndpoints {
    FeedEndpoints::via_relay(&upstream.base_url).with_earthquake(vec![
        upstream.url(EQ_HOUR),
        upstream.url(EQ_DAY),
        upstream.url(EQ_WEEK),
    ])
}

pub fn aggregator(upstream: &FakeUpstream) -> Aggregator {
    Aggregator::new(test_client(), endpoints(upstream))
}

pub fn all_sources_ok() -> Vec<(&'static str, Canned)> {
    vec![
        (EQ_HOUR, Canned::ok("application/geo+json", EARTHQUAKES)),
        (TSUNAMI, Canned::ok("application/xml", TSUNAMI_FEED)),
        (WILDFIRE, Canned::ok("text/csv", FIRE_CSV)),
        (WEATHER, Canned::ok("application/geo+json", WEATHER_ALERTS)),
        (FLOOD, Canned::ok("application/json", FLOOD_SITES)),
    ]
}
