//! Fetch, extract, filter and locate through the pipeline

use crate::fixtures::{geocoder_config, listing_page, source_config, LISTING_PATH};
use dgt_balizas::pipeline::{filter_active, find_by_id, locate, locate_batch};
use dgt_balizas::{BalizasError, Category, Pipeline, PrecisionLabel, Resolver};
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_filters_by_province() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("provIci", "28"))
        .and(query_param("ca", ""))
        .and(query_param("caracter", "acontecimiento"))
        .and(query_param("IncidenciasOTROS", "IncidenciasOTROS"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page()))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(&source_config(&server, 5)).unwrap();
    let records = pipeline.fetch(None, Some("madrid")).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "987654");
    assert_eq!(records[0].region, "COMUNIDAD DE MADRID");
    assert!(records[0].is_active);

    assert_eq!(records[1].id, "555");
    assert_eq!(records[1].category, Category::ObstacleFromAccident);
    assert_eq!(records[1].end_date.as_deref(), Some("01/01/2024"));
    assert_eq!(records[1].end_time.as_deref(), Some("06:10"));
    assert!(!records[1].is_active);
}

#[tokio::test]
async fn test_fetch_report_counts_skipped_rows() {
    let server = MockServer::start().await;
    mount_listing(&server).await;

    let pipeline = Pipeline::new(&source_config(&server, 5)).unwrap();
    let report = pipeline.fetch_report(None, None).await.unwrap();

    assert_eq!(report.rows_scanned, 5);
    assert_eq!(report.candidate_rows, 3);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].row_index, 4);
}

#[tokio::test]
async fn test_filter_active_and_find_by_id() {
    let server = MockServer::start().await;
    mount_listing(&server).await;

    let pipeline = Pipeline::new(&source_config(&server, 5)).unwrap();
    let records = pipeline.fetch(None, None).await.unwrap();

    let active = filter_active(&records);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "987654");

    assert_eq!(find_by_id(&records, "555").map(|r| r.road.as_str()), Some("A-4"));
    assert!(find_by_id(&records, "000").is_none());
}

#[tokio::test]
async fn test_server_error_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(&source_config(&server, 5)).unwrap();
    let result = pipeline.fetch(None, None).await;

    assert!(matches!(
        result,
        Err(BalizasError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(&source_config(&server, 1)).unwrap();
    let result = pipeline.fetch(None, None).await;

    assert!(matches!(result, Err(BalizasError::Timeout { .. })));
}

#[tokio::test]
async fn test_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(&source_config(&server, 5)).unwrap();
    assert!(pipeline.fetch(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_locate_attaches_location() {
    let source = MockServer::start().await;
    mount_listing(&source).await;
    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "A-1 km 23.5, ALCOBENDAS, MADRID, España"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"lat": "40.5472", "lon": "-3.6420"}])),
        )
        .expect(1)
        .mount(&geocoder)
        .await;

    let pipeline = Pipeline::new(&source_config(&source, 5)).unwrap();
    let mut records = pipeline.fetch(None, None).await.unwrap();
    let mut resolver = Resolver::new(&geocoder_config(&geocoder, 10)).unwrap();

    assert!(locate(&mut records[0], &mut resolver).await);
    let location = records[0].location.as_ref().unwrap();
    assert_eq!(location.precision_label, PrecisionLabel::VeryHigh);
    assert!((location.latitude - 40.5472).abs() < 1e-6);

    // Already located: no new request
    assert!(locate(&mut records[0], &mut resolver).await);
    assert_eq!(resolver.stats().requests, 1);
}

#[tokio::test]
async fn test_locate_batch_respects_limit() {
    let source = MockServer::start().await;
    mount_listing(&source).await;
    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"lat": "40.4", "lon": "-3.7"}])),
        )
        .mount(&geocoder)
        .await;

    let pipeline = Pipeline::new(&source_config(&source, 5)).unwrap();
    let mut records = pipeline.fetch(None, None).await.unwrap();
    let mut resolver = Resolver::new(&geocoder_config(&geocoder, 10)).unwrap();

    let summary = locate_batch(&mut records, &mut resolver, 1).await;

    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.located, 1);
    assert_eq!(summary.deferred, 1);
    assert!(records[0].is_located());
    assert!(!records[1].is_located());
}
