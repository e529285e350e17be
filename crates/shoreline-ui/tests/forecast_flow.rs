//! End-to-end forecast flow against a mock endpoint.

use std::sync::Arc;
use std::time::Duration;

use shoreline_forecast::{FetchPhase, ForecastClient};
use shoreline_store::{DomainStore, MemoryStorage};
use shoreline_ui::{view, Action, Controller, Page, Region};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OUTLOOK_PATH: &str = "/v1/environment/4-day-weather-forecast";

fn controller() -> Controller<Page> {
    let store = DomainStore::open(Arc::new(MemoryStorage::new()), "beachCleanupState");
    Controller::new(store, Page::new())
}

fn client_for(server: &MockServer) -> ForecastClient {
    ForecastClient::new(
        format!("{}{}", server.uri(), OUTLOOK_PATH),
        Duration::from_secs(2),
    )
    .unwrap()
}

async fn mount_outlook(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(OUTLOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "forecasts": [
                    {
                        "date": "2026-10-17",
                        "forecast": "Thundery Showers",
                        "temperature": {"low": 24, "high": 32},
                        "wind": {"speed": {"low": 10, "high": 20}, "direction": "NNE"},
                        "relative_humidity": {"low": 60, "high": 95}
                    },
                    {
                        "date": "2026-10-18",
                        "forecast": "Fair <b>& warm</b>",
                        "wind": {"direction": "S"}
                    }
                ]
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_forecast_renders_cards() {
    let mock_server = MockServer::start().await;
    mount_outlook(&mock_server).await;

    let mut c = controller();
    c.refresh_forecast(&client_for(&mock_server)).await;

    assert_eq!(c.forecast_phase(), FetchPhase::Succeeded);
    let html = c.surface().region(Region::Forecast).as_str();
    assert_eq!(html.matches("forecast-card").count(), 2);
    assert!(html.contains("icon-thunder"));
    assert!(html.contains("24 / 32"));
    assert!(html.contains("- / -"));
    assert!(html.contains("Fair &lt;b&gt;&amp; warm&lt;/b&gt;"));
}

#[tokio::test]
async fn test_network_failure_keeps_roster_and_shows_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = ForecastClient::new(format!("http://{addr}/"), Duration::from_secs(2)).unwrap();

    let mut c = controller();
    c.handle(Action::AddCrew {
        name: "Ana".into(),
        role: "Captain".into(),
    })
    .unwrap();
    let roster_before = c.surface().region(Region::Roster).clone();
    let state_before = c.store().state().clone();

    c.refresh_forecast(&client).await;

    assert_eq!(c.forecast_phase(), FetchPhase::Failed);
    assert_eq!(c.store().state(), &state_before);
    assert_eq!(c.surface().region(Region::Roster), &roster_before);
    let html = c.surface().region(Region::Forecast).as_str();
    assert!(html.contains("forecast-error"));
    assert!(!html.contains(view::FORECAST_LOADING));
}

#[tokio::test]
async fn test_empty_outlook_shows_no_data() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OUTLOOK_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"items": [{"forecasts": []}]})),
        )
        .mount(&mock_server)
        .await;

    let mut c = controller();
    c.refresh_forecast(&client_for(&mock_server)).await;

    assert!(c
        .surface()
        .region(Region::Forecast)
        .as_str()
        .contains("No forecast data available."));
}

#[tokio::test]
async fn test_null_outlook_shows_no_data() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OUTLOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": null})))
        .mount(&mock_server)
        .await;

    let mut c = controller();
    c.refresh_forecast(&client_for(&mock_server)).await;

    assert_eq!(c.forecast_phase(), FetchPhase::Failed);
    assert!(c
        .surface()
        .region(Region::Forecast)
        .as_str()
        .contains("No forecast data available."));
}

#[tokio::test]
async fn test_background_request_delivers_via_channel() {
    let mock_server = MockServer::start().await;
    mount_outlook(&mock_server).await;

    let mut c = controller();
    c.request_forecast(
        &tokio::runtime::Handle::current(),
        Arc::new(client_for(&mock_server)),
    );
    assert_eq!(c.forecast_phase(), FetchPhase::Loading);

    // Crew edits proceed while the fetch is in flight.
    c.handle(Action::AddCrew {
        name: "Ben".into(),
        role: String::new(),
    })
    .unwrap();

    let mut applied = 0;
    for _ in 0..100 {
        applied += c.poll_messages();
        if applied > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(applied, 1);
    assert_eq!(c.forecast_phase(), FetchPhase::Succeeded);
    assert_eq!(c.store().crew().len(), 1);
    assert!(c
        .surface()
        .region(Region::Forecast)
        .as_str()
        .contains("icon-thunder"));
}
