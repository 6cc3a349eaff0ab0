//! Provider client tests against an in-process fake upstream.
//!
//! The fake serves the subset of the AccuWeather and Spotify APIs the clients
//! use, bound to an ephemeral local port.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};

use weather_music_player::config::{AppConfig, MusicConfig, WeatherConfig};
use weather_music_player::music::{MusicError, SpotifyClient, TrackProvider};
use weather_music_player::server::{create_router, AppState};
use weather_music_player::weather::{AccuWeatherClient, WeatherError, WeatherProvider};

const API_KEY: &str = "test-key";
const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";
const TOKEN: &str = "fake-token";

async fn city_search(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("apikey").map(String::as_str) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, "Api Authorization failed").into_response();
    }
    let results = match params.get("q").map(String::as_str) {
        Some("Stockholm") => json!([
            {"Key": "314929", "LocalizedName": "Stockholm", "Country": {"ID": "SE"}}
        ]),
        Some("Broken") => json!([{"Key": "500", "LocalizedName": "Broken"}]),
        Some("Garbled") => json!([{"Key": "garbled", "LocalizedName": "Garbled"}]),
        _ => json!([]),
    };
    Json(results).into_response()
}

async fn current_conditions(Path(key): Path<String>) -> Response {
    match key.as_str() {
        "314929" => Json(json!([{
            "WeatherText": "Mostly cloudy",
            "WeatherIcon": 6,
            "HasPrecipitation": false,
            "IsDayTime": false,
            "Temperature": {
                "Metric": {"Value": 24.0, "Unit": "C", "UnitType": 17},
                "Imperial": {"Value": 75.0, "Unit": "F", "UnitType": 18}
            }
        }]))
        .into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response(),
    }
}

async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == BASIC_AUTH);
    if !authorized || form.get("grant_type").map(String::as_str) != Some("client_credentials") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_client"})),
        )
            .into_response();
    }
    Json(json!({"access_token": TOKEN, "token_type": "Bearer", "expires_in": 3600}))
        .into_response()
}

async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    let bearer = format!("Bearer {TOKEN}");
    if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(bearer.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if params.get("type").map(String::as_str) != Some("track") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(20);
    let query = params.get("q").cloned().unwrap_or_default();
    let market = params.get("market").cloned().unwrap_or_else(|| "any".to_string());

    let items: Vec<Value> = (1..=limit)
        .map(|n| {
            json!({
                "name": format!("{query} {n} ({market})"),
                "artists": [{"name": "Band"}, {"name": "Guest"}],
                "external_urls": {"spotify": format!("https://open.spotify.com/track/{n}")}
            })
        })
        .collect();

    Json(json!({"tracks": {"items": items, "limit": limit}})).into_response()
}

/// Start the fake upstream and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/locations/v1/cities/search", get(city_search))
        .route("/currentconditions/v1/:key", get(current_conditions))
        .route("/api/token", post(token))
        .route("/v1/search", get(search));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn weather_config(base: &str) -> WeatherConfig {
    WeatherConfig {
        api_key: API_KEY.to_string(),
        base_url: base.to_string(),
        ..WeatherConfig::default()
    }
}

fn music_config(base: &str) -> MusicConfig {
    MusicConfig {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        api_url: format!("{base}/v1"),
        auth_url: format!("{base}/api/token"),
        ..MusicConfig::default()
    }
}

#[tokio::test]
async fn test_weather_lookup() {
    let base = spawn_upstream().await;
    let client = AccuWeatherClient::new(&weather_config(&base)).unwrap();

    let location = client.find_location("Stockholm").await.unwrap();
    assert_eq!(location.id.0, "314929");

    let observation = client.current_conditions(&location).await.unwrap();
    assert_eq!(observation.city_name, "Stockholm");
    assert_eq!(observation.weather_text, "Mostly cloudy");
    assert_eq!(observation.temperature, 24.0);
    assert_eq!(observation.icon_code, 6);
    assert!(!observation.is_day_time);
}

#[tokio::test]
async fn test_weather_unknown_city() {
    let base = spawn_upstream().await;
    let client = AccuWeatherClient::new(&weather_config(&base)).unwrap();

    let err = client.find_location("Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound(_)));
}

#[tokio::test]
async fn test_weather_bad_key_is_status_error() {
    let base = spawn_upstream().await;
    let config = WeatherConfig {
        api_key: "wrong".to_string(),
        ..weather_config(&base)
    };
    let client = AccuWeatherClient::new(&config).unwrap();

    match client.find_location("Stockholm").await {
        Err(WeatherError::Status { status, .. }) => assert_eq!(status.as_u16(), 401),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_weather_conditions_unavailable() {
    let base = spawn_upstream().await;
    let client = AccuWeatherClient::new(&weather_config(&base)).unwrap();

    let location = client.find_location("Broken").await.unwrap();
    match client.current_conditions(&location).await {
        Err(WeatherError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "try later");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_weather_garbled_payload_is_malformed() {
    let base = spawn_upstream().await;
    let client = AccuWeatherClient::new(&weather_config(&base)).unwrap();

    let location = client.find_location("Garbled").await.unwrap();
    let err = client.current_conditions(&location).await.unwrap_err();
    assert!(matches!(err, WeatherError::Malformed(_)));
}

#[tokio::test]
async fn test_weather_unreachable_is_http_error() {
    // Port 9 (discard) on localhost is expected to refuse connections
    let client = AccuWeatherClient::new(&weather_config("http://127.0.0.1:9")).unwrap();

    let err = client.find_location("Stockholm").await.unwrap_err();
    assert!(matches!(err, WeatherError::Http(_)));
}

#[tokio::test]
async fn test_track_search() {
    let base = spawn_upstream().await;
    let client = SpotifyClient::new(&music_config(&base)).unwrap();

    let tracks = client.search_tracks("moody autumn indie", 5).await.unwrap();

    assert_eq!(tracks.len(), 5);
    assert_eq!(tracks[0].title, "moody autumn indie 1 (any)");
    assert_eq!(tracks[0].artist_names, vec!["Band", "Guest"]);
    assert_eq!(tracks[4].url, "https://open.spotify.com/track/5");
}

#[tokio::test]
async fn test_track_search_with_market() {
    let base = spawn_upstream().await;
    let config = MusicConfig {
        market: Some("SE".to_string()),
        ..music_config(&base)
    };
    let client = SpotifyClient::new(&config).unwrap();

    let tracks = client.search_tracks("chill pop", 2).await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].title, "chill pop 2 (SE)");
}

#[tokio::test]
async fn test_track_search_bad_credentials() {
    let base = spawn_upstream().await;
    let config = MusicConfig {
        client_secret: "wrong".to_string(),
        ..music_config(&base)
    };
    let client = SpotifyClient::new(&config).unwrap();

    match client.search_tracks("chill pop", 5).await {
        Err(MusicError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_end_to_end_with_bundled_table() {
    let base = spawn_upstream().await;
    let config = AppConfig {
        weather: weather_config(&base),
        music: music_config(&base),
        ..AppConfig::default()
    };
    config.validate().unwrap();

    let state = AppState::from_config(config).unwrap();
    let server = TestServer::new(create_router(state)).unwrap();

    let weather = server
        .post("/get_weather")
        .form(&[("city", "Stockholm")])
        .await;
    weather.assert_status_ok();
    let body: Value = weather.json();
    let mood = body["music_mood"].as_str().unwrap().to_string();
    assert_eq!(mood, "moody autumn indie");

    let songs = server.post("/get_songs").form(&[("mood", mood.as_str())]).await;
    songs.assert_status_ok();
    let body: Value = songs.json();
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 5);
    assert_eq!(songs[0]["artist"], "Band, Guest");
    assert_eq!(songs[0]["title"], "moody autumn indie 1 (any)");
}

#[tokio::test]
async fn test_missing_table_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.mood.table_path = dir.path().join("missing.csv");

    assert!(AppState::from_config(config).is_err());
}
