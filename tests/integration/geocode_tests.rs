//! Resolver cascade, memoization and rate limiting against a mock Nominatim

use crate::fixtures::geocoder_config;
use dgt_balizas::{LocationQuery, PrecisionLabel, Resolver};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hit(lat: &str, lon: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!([{
        "lat": lat,
        "lon": lon,
        "display_name": "somewhere, España"
    }]))
}

/// Answers `query` with a hit and every other search with no results
async fn mount_only_match(server: &MockServer, query: &str) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(hit("40.4168", "-3.7038"))
        .with_priority(1)
        .mount(server)
        .await;

    mount_no_results(server).await;
}

async fn mount_no_results(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .with_priority(10)
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}

fn alcobendas() -> LocationQuery {
    LocationQuery::new("A-1", "23", "MADRID").with_locality("Alcobendas")
}

#[tokio::test]
async fn test_most_specific_query_wins() {
    let server = MockServer::start().await;
    mount_only_match(&server, "A-1 km 23, Alcobendas, MADRID, España").await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    let result = resolver.resolve(&alcobendas()).await.unwrap();

    assert_eq!(result.precision_label, PrecisionLabel::VeryHigh);
    assert_eq!(result.source_query, "A-1 km 23, Alcobendas, MADRID, España");
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_cascade_stops_at_first_match() {
    let server = MockServer::start().await;
    mount_only_match(&server, "A-1 km 23, España").await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    let result = resolver.resolve(&alcobendas()).await.unwrap();

    assert_eq!(result.precision_label, PrecisionLabel::Medium);
    assert_eq!(result.source_query, "A-1 km 23, España");
    // Levels 1-3 missed, level 4 matched, levels 5-7 never sent
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_falls_back_to_province() {
    let server = MockServer::start().await;
    mount_only_match(&server, "MADRID, España").await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    let result = resolver.resolve(&alcobendas()).await.unwrap();

    assert_eq!(result.precision_label, PrecisionLabel::Estimated);
    assert!((result.latitude - 40.4168).abs() < 1e-6);
    assert!((result.longitude + 3.7038).abs() < 1e-6);
    assert_eq!(request_count(&server).await, 7);
}

#[tokio::test]
async fn test_no_match_anywhere_is_memoized() {
    let server = MockServer::start().await;
    mount_no_results(&server).await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    assert!(resolver.resolve(&alcobendas()).await.is_none());
    assert_eq!(request_count(&server).await, 7);

    // Every "no match" was remembered
    assert!(resolver.resolve(&alcobendas()).await.is_none());
    assert_eq!(request_count(&server).await, 7);
    assert_eq!(resolver.memo_len(), 7);

    let stats = resolver.stats();
    assert_eq!(stats.lookups, 14);
    assert_eq!(stats.memo_hits, 7);
    assert_eq!(stats.unresolved, 2);
}

#[tokio::test]
async fn test_repeated_resolution_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(hit("43.0", "-7.5"))
        .expect(1)
        .mount(&server)
        .await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    let location = LocationQuery::new("N-VI", "480", "LUGO");

    let first = resolver.resolve(&location).await.unwrap();
    let second = resolver.resolve(&location).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(resolver.stats().requests, 1);
    assert_eq!(resolver.stats().memo_hits, 1);
}

#[tokio::test]
async fn test_requests_are_spaced_by_min_interval() {
    let server = MockServer::start().await;
    mount_no_results(&server).await;

    let interval = Duration::from_millis(200);
    let mut resolver = Resolver::new(&geocoder_config(&server, 200)).unwrap();

    let start = Instant::now();
    for query in ["LUGO, España", "SORIA, España", "HUESCA, España"] {
        assert!(resolver.lookup(query).await.is_none());
    }

    assert_eq!(request_count(&server).await, 3);
    assert!(start.elapsed() >= interval * 2);
}

#[tokio::test]
async fn test_memo_hits_skip_the_rate_limit() {
    let server = MockServer::start().await;
    mount_no_results(&server).await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 1000)).unwrap();
    resolver.lookup("LUGO, España").await;

    let start = Instant::now();
    for _ in 0..5 {
        resolver.lookup("LUGO, España").await;
    }

    assert!(start.elapsed() < Duration::from_millis(500));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_transport_error_continues_cascade_and_is_not_memoized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "A-1 km 23, Alcobendas, MADRID, España"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Alcobendas, A-1, MADRID, España"))
        .respond_with(hit("40.5472", "-3.6420"))
        .with_priority(1)
        .mount(&server)
        .await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    let result = resolver.resolve(&alcobendas()).await.unwrap();

    assert_eq!(result.precision_label, PrecisionLabel::High);
    assert_eq!(resolver.stats().failures, 1);
    assert!(!resolver.is_memoized("A-1 km 23, Alcobendas, MADRID, España"));
    assert!(resolver.is_memoized("Alcobendas, A-1, MADRID, España"));
}

#[tokio::test]
async fn test_unreachable_geocoder_yields_none() {
    // Nothing listens on the discard port
    let config = dgt_balizas::config::GeocoderConfig {
        endpoint: "http://127.0.0.1:9/search".to_string(),
        min_interval_ms: 10,
        timeout_secs: 2,
        ..Default::default()
    };
    let mut resolver = Resolver::new(&config).unwrap();

    let result = resolver.resolve(&LocationQuery::new("", "", "SORIA")).await;

    assert!(result.is_none());
    assert_eq!(resolver.stats().failures, 1);
    assert_eq!(resolver.memo_len(), 0);
}

#[tokio::test]
async fn test_clear_memo_forces_new_requests() {
    let server = MockServer::start().await;
    mount_no_results(&server).await;

    let mut resolver = Resolver::new(&geocoder_config(&server, 10)).unwrap();
    resolver.lookup("LUGO, España").await;
    resolver.clear_memo();
    resolver.lookup("LUGO, España").await;

    assert_eq!(request_count(&server).await, 2);
}
