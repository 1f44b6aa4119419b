//! HTTP-level client tests against a mock upstream

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cuacalaut_core::config::{Config, WeatherConfig};
use cuacalaut_core::error::CoreError;
use cuacalaut_core::external::{AlwaysOnline, BmkgClient, MemoryStore, WeatherApi};
use cuacalaut_core::services::WeatherService;

fn client_for(server: &MockServer) -> BmkgClient {
    BmkgClient::new(&WeatherConfig {
        base_url: server.uri(),
        marine_url: server.uri(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_forecast_sends_adm4_and_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("adm4", "3171010001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lokasi": {"kota": "Jakarta Pusat"},
            "data": [{"local_datetime": "2024-06-01 06:00:00", "t": 28}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = client_for(&server).fetch_forecast("3171010001").await.unwrap();
    assert_eq!(raw["lokasi"]["kota"], "Jakarta Pusat");
}

#[tokio::test]
async fn test_fetch_marine_sends_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("lat", "-6.17511"))
        .and(query_param("lon", "106.865039"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tinggi_gelombang": 1.2,
            "kecepatan_angin": 8.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = client_for(&server)
        .fetch_marine(-6.17511, 106.865039)
        .await
        .unwrap();
    assert_eq!(raw["tinggi_gelombang"], 1.2);
}

#[tokio::test]
async fn test_non_2xx_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("gateway sad"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_forecast("3171010001").await;
    match result {
        Err(CoreError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "gateway sad");
        }
        other => panic!("expected upstream status error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_service_recovers_through_transient_upstream_errors() {
    let server = MockServer::start().await;

    // Two failures, then success: the retry loop should ride them out.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lokasi": {"kota": "Jakarta Pusat"},
            "data": [{"local_datetime": "2024-06-01 06:00:00", "t": 28}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = WeatherService::new(
        Arc::new(client_for(&server)),
        Arc::new(MemoryStore::new()),
        Arc::new(AlwaysOnline::new()),
        &Config::default(),
    );

    let snapshot = service.get_weather_by_location("3171010001").await.unwrap();
    assert_eq!(snapshot.location.city.as_deref(), Some("Jakarta Pusat"));
    assert_eq!(snapshot.forecasts[0].temperature, Some(28.0));
}
