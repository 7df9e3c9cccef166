//! Each source fetcher over HTTP: transport failures, fallbacks and normalized output.

use chrono::DateTime;
use hazard_feed_core::sources::{
    EarthquakeSource, FloodSource, HazardSource, TsunamiSource, WeatherSource, WildfireSource,
};
use hazard_feed_core::{FeedError, HazardEvent, HazardType};
use pretty_assertions::assert_eq;

use crate::common::fake_upstream::{Canned, FakeUpstream};
use crate::common::fixtures::*;

fn assert_renderable(events: &[HazardEvent]) {
    for e in events {
        assert!(e.lat.is_finite() && e.lng.is_finite(), "non-finite coordinates in {:?}", e);
        let iso = serde_json::to_value(e).expect("serialize")["date"]
            .as_str()
            .expect("date string")
            .to_string();
        assert!(DateTime::parse_from_rfc3339(&iso).is_ok(), "unparseable date {}", iso);
    }
}

#[tokio::test]
async fn earthquake_end_to_end_feature() {
    let upstream = FakeUpstream::start(vec![(EQ_HOUR, Canned::ok("application/geo+json", EARTHQUAKES))]).await;
    let source = EarthquakeSource::new(test_client(), vec![upstream.url(EQ_HOUR)]);

    let events = source.fetch().await.expect("fetch");
    assert_eq!(events.len(), 2);
    assert_renderable(&events);

    let json = serde_json::to_value(&events[0]).expect("serialize");
    assert_eq!(json["lat"], 20.0);
    assert_eq!(json["lng"], 10.0);
    assert_eq!(json["magnitude"], 6.2);
    assert_eq!(json["type"], "earthquake");
    assert_eq!(json["date"], "2023-11-14T22:13:20.000Z");
    assert_eq!(json["url"], "https://earthquake.usgs.gov/a");

    // null magnitude falls back to 1, unparseable time to now
    assert_eq!(events[1].magnitude, 1.0);
}

#[tokio::test]
async fn earthquake_falls_back_hourly_daily_significant() {
    let upstream = FakeUpstream::start(vec![
        (EQ_HOUR, Canned::status(503)),
        (EQ_DAY, Canned::status(500)),
        (EQ_WEEK, Canned::ok("application/geo+json", EARTHQUAKES)),
    ])
    .await;
    let source = EarthquakeSource::new(
        test_client(),
        vec![upstream.url(EQ_HOUR), upstream.url(EQ_DAY), upstream.url(EQ_WEEK)],
    );

    let events = source.fetch().await.expect("significant feed used");
    assert_eq!(events.len(), 2);
    assert_eq!(upstream.hits(), vec![EQ_HOUR, EQ_DAY, EQ_WEEK]);
}

#[tokio::test]
async fn earthquake_stops_at_first_healthy_endpoint() {
    let upstream = FakeUpstream::start(vec![
        (EQ_HOUR, Canned::status(502)),
        (EQ_DAY, Canned::ok("application/geo+json", EARTHQUAKES)),
        (EQ_WEEK, Canned::ok("application/geo+json", EARTHQUAKES)),
    ])
    .await;
    let source = EarthquakeSource::new(
        test_client(),
        vec![upstream.url(EQ_HOUR), upstream.url(EQ_DAY), upstream.url(EQ_WEEK)],
    );

    source.fetch().await.expect("daily feed used");
    assert_eq!(upstream.hits(), vec![EQ_HOUR, EQ_DAY]);
}

#[tokio::test]
async fn earthquake_undecodable_body_tries_next_endpoint() {
    let upstream = FakeUpstream::start(vec![
        (EQ_HOUR, Canned::ok("text/html", "<html>maintenance</html>")),
        (EQ_DAY, Canned::ok("application/geo+json", EARTHQUAKES)),
    ])
    .await;
    let source = EarthquakeSource::new(
        test_client(),
        vec![upstream.url(EQ_HOUR), upstream.url(EQ_DAY), upstream.url(EQ_WEEK)],
    );

    let events = source.fetch().await.expect("daily feed used");
    assert_eq!(events.len(), 2);
    assert_eq!(upstream.hits(), vec![EQ_HOUR, EQ_DAY]);
}

#[tokio::test]
async fn earthquake_all_endpoints_down_is_an_error() {
    let upstream = FakeUpstream::start(vec![]).await;
    let source = EarthquakeSource::new(
        test_client(),
        vec![upstream.url(EQ_HOUR), upstream.url(EQ_DAY), upstream.url(EQ_WEEK)],
    );

    let err = source.fetch().await.expect_err("all endpoints 404");
    assert!(matches!(err, FeedError::AllEndpointsFailed(_)), "got {:?}", err);
    assert!(source.fetch_or_empty().await.is_empty());
}

#[tokio::test]
async fn relay_backed_sources_normalize_payloads() {
    let upstream = FakeUpstream::start(all_sources_ok()).await;
    let client = test_client();

    let tsunamis = TsunamiSource::new(client.clone(), upstream.url(TSUNAMI)).fetch().await.expect("tsunami");
    assert_eq!(tsunamis.len(), 1);
    assert_eq!((tsunamis[0].lat, tsunamis[0].lng), (57.0, -152.0));
    assert_eq!(tsunamis[0].magnitude, 7.5);

    let fires = WildfireSource::new(client.clone(), upstream.url(WILDFIRE)).fetch().await.expect("fire");
    let magnitudes: Vec<f64> = fires.iter().map(|e| e.magnitude).collect();
    assert_eq!(magnitudes, vec![5.0, 2.0]);

    let alerts = WeatherSource::new(client.clone(), upstream.url(WEATHER)).fetch().await.expect("weather");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[1].title, "Heat Advisory");
    assert_eq!((alerts[1].lat, alerts[1].lng), (40.0, -100.0));

    let floods = FloodSource::new(client, upstream.url(FLOOD)).fetch().await.expect("flood");
    assert_eq!(floods.len(), 2);
    assert_eq!(floods[0].magnitude, 5.0);
    assert!(floods[0].title.starts_with("Major Flooding"));
    assert_eq!(floods[1].magnitude, 1.0);
    assert!(floods[1].title.starts_with("Normal"));

    for batch in [&tsunamis, &fires, &alerts, &floods] {
        assert_renderable(batch);
    }
}

#[tokio::test]
async fn non_2xx_relay_response_isolates_the_source() {
    let upstream = FakeUpstream::start(vec![
        (TSUNAMI, Canned::status(502)),
        (WEATHER, Canned::ok("application/json", "not json at all")),
    ])
    .await;
    let client = test_client();

    let tsunami = TsunamiSource::new(client.clone(), upstream.url(TSUNAMI));
    match tsunami.fetch().await {
        Err(FeedError::Upstream { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected upstream error, got {:?}", other.map(|e| e.len())),
    }
    assert!(tsunami.fetch_or_empty().await.is_empty());

    let weather = WeatherSource::new(client, upstream.url(WEATHER));
    assert!(matches!(weather.fetch().await, Err(FeedError::Json(_))));
    assert!(weather.fetch_or_empty().await.is_empty());
}

#[tokio::test]
async fn same_payload_normalizes_to_same_content() {
    let upstream = FakeUpstream::start(all_sources_ok()).await;
    let source = WildfireSource::new(test_client(), upstream.url(WILDFIRE));

    let strip = |events: Vec<HazardEvent>| -> Vec<(String, f64, f64, f64, String, HazardType)> {
        events
            .into_iter()
            .map(|e| (e.title, e.lat, e.lng, e.magnitude, e.date.to_rfc3339(), e.hazard_type))
            .collect()
    };
    let first = source.fetch().await.expect("first");
    let second = source.fetch().await.expect("second");
    assert_ne!(first[0].id, second[0].id, "ids are regenerated every pass");
    assert_eq!(strip(first), strip(second));
}
