//! HTTP server setup and routing.

mod extractors;
mod routes;
mod songs;
mod weather;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::mood::MoodTable;
use crate::music::{SpotifyClient, TrackProvider};
use crate::weather::{AccuWeatherClient, WeatherProvider};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Mood mapping table, read-only after startup
    pub moods: Arc<MoodTable>,
    pub weather: Arc<dyn WeatherProvider>,
    pub music: Arc<dyn TrackProvider>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        moods: MoodTable,
        weather: Arc<dyn WeatherProvider>,
        music: Arc<dyn TrackProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            moods: Arc::new(moods),
            weather,
            music,
            started_at: Instant::now(),
        }
    }

    /// Load the mood table and build the provider clients named in `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let moods = MoodTable::load(&config.mood.table_path)?;
        let weather = AccuWeatherClient::new(&config.weather)
            .map_err(|e| AppError::Unexpected(format!("Failed to build weather client: {e}")))?;
        let music = SpotifyClient::new(&config.music)
            .map_err(|e| AppError::Unexpected(format!("Failed to build music client: {e}")))?;

        Ok(Self::new(config, moods, Arc::new(weather), Arc::new(music)))
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/get_weather", post(weather::get_weather))
        .route("/get_songs", post(songs::get_songs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
