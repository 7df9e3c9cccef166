//! Hazard feed core: fetches earthquake, tsunami, wildfire, weather and flood
//! data, normalizes each feed into [`HazardEvent`]s and merges them into one
//! [`AggregatedFeed`] for the relief map.
//!
//! Earthquakes are read from USGS directly. The other four feeds go through
//! the `hazard-relay` service, see [`FeedEndpoints::via_relay`].

pub mod aggregator;
pub mod api;
pub mod config;
pub mod date;
pub mod error;
pub mod models;
pub mod presentation;
pub mod refresh;
pub mod sources;

pub use aggregator::Aggregator;
pub use api::build_client;
pub use config::FeedEndpoints;
pub use error::{FeedError, Result};
pub use models::{
    flood_stage, AggregatedFeed, FloodSite, FloodSitesResponse, FloodStage, HazardEvent, HazardType,
};
pub use refresh::{RefreshLoop, DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL};
pub use sources::HazardSource;
