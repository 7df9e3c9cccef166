//! Aggregation: provenance order, partial failure and the mandatory earthquake source.

use std::collections::HashSet;

use hazard_feed_core::{FeedError, HazardType};
use pretty_assertions::assert_eq;

use crate::common::fake_upstream::{Canned, FakeUpstream};
use crate::common::fixtures::*;

const ALL_SOURCES: &str =
    "USGS Earthquakes, NOAA Tsunamis, NASA FIRMS Wildfires, NOAA Weather, USGS Water Services";

#[tokio::test]
async fn all_sources_succeed() {
    let upstream = FakeUpstream::start(all_sources_ok()).await;
    let feed = aggregator(&upstream).fetch_all().await.expect("aggregate");

    assert_eq!(feed.sources, ALL_SOURCES);
    // 2 earthquakes, 1 tsunami, 2 fires, 2 alerts, 2 gauges
    assert_eq!(feed.events.len(), 9);
    assert!(!feed.timestamp.is_empty());

    let ids: HashSet<&str> = feed.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), feed.events.len(), "ids unique within a pass");

    let order: Vec<HazardType> = feed.events.iter().map(|e| e.hazard_type).collect();
    let mut deduped = order.clone();
    deduped.dedup();
    assert_eq!(deduped, HazardType::ALL.to_vec(), "events grouped in source order");
}

#[tokio::test]
async fn provenance_order_ignores_completion_order() {
    // Completion order is the reverse of the fold order: flood first, earthquakes last.
    let delays = [(EQ_HOUR, 400), (TSUNAMI, 300), (WILDFIRE, 200), (WEATHER, 100), (FLOOD, 0)];
    let routes = all_sources_ok()
        .into_iter()
        .map(|(path, canned)| {
            let ms = delays.iter().find(|(p, _)| *p == path).map_or(0, |(_, ms)| *ms);
            (path, canned.delayed(ms))
        })
        .collect();
    let upstream = FakeUpstream::start(routes).await;

    let feed = aggregator(&upstream).fetch_all().await.expect("aggregate");
    assert_eq!(feed.sources, ALL_SOURCES);

    let order: Vec<HazardType> = feed.events.iter().map(|e| e.hazard_type).collect();
    let mut grouped = order.clone();
    grouped.dedup();
    assert_eq!(grouped, HazardType::ALL.to_vec());
    assert_eq!(feed.events.len(), 9);
}

#[tokio::test]
async fn optional_sources_failing_leaves_earthquakes_only() {
    let upstream = FakeUpstream::start(vec![
        (EQ_HOUR, Canned::ok("application/geo+json", EARTHQUAKES)),
        (TSUNAMI, Canned::status(500)),
        (WILDFIRE, Canned::status(400)),
        (WEATHER, Canned::status(503)),
        (FLOOD, Canned::status(502)),
    ])
    .await;

    let feed = aggregator(&upstream).fetch_all().await.expect("earthquakes still aggregate");
    assert_eq!(feed.sources, "USGS Earthquakes");
    assert_eq!(feed.events.len(), 2);
    assert!(feed.events.iter().all(|e| e.hazard_type == HazardType::Earthquake));
}

#[tokio::test]
async fn one_failing_source_is_omitted_from_provenance() {
    let mut routes = all_sources_ok();
    routes.retain(|(path, _)| *path != WILDFIRE);
    let upstream = FakeUpstream::start(routes).await;

    let feed = aggregator(&upstream).fetch_all().await.expect("aggregate");
    assert_eq!(
        feed.sources,
        "USGS Earthquakes, NOAA Tsunamis, NOAA Weather, USGS Water Services"
    );
    assert!(feed.events.iter().all(|e| e.hazard_type != HazardType::Fire));
}

#[tokio::test]
async fn earthquake_failure_fails_the_pass() {
    let mut routes = all_sources_ok();
    routes.retain(|(path, _)| *path != EQ_HOUR);
    let upstream = FakeUpstream::start(routes).await;

    let err = aggregator(&upstream).fetch_all().await.expect_err("anchor source down");
    assert!(matches!(err, FeedError::AllEndpointsFailed(_)));
}

#[tokio::test]
async fn per_source_view_flattens_failures() {
    let mut routes = all_sources_ok();
    routes.retain(|(path, _)| *path != EQ_HOUR && *path != FLOOD);
    let upstream = FakeUpstream::start(routes).await;

    let per_source = aggregator(&upstream).fetch_each_or_empty().await;
    let counts: Vec<(HazardType, usize)> = per_source.iter().map(|(t, e)| (*t, e.len())).collect();
    assert_eq!(
        counts,
        vec![
            (HazardType::Earthquake, 0),
            (HazardType::Tsunami, 1),
            (HazardType::Fire, 2),
            (HazardType::Weather, 2),
            (HazardType::Flood, 0),
        ]
    );
}
