//! Weather lookup.
//!
//! Resolves a city name to a provider location and fetches its current
//! conditions. The provider sits behind [`WeatherProvider`] so request
//! handlers can be exercised without network access.

mod accuweather;

pub use accuweather::AccuWeatherClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for weather lookups
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No location found for '{0}'")]
    NotFound(String),

    #[error("Weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected weather payload: {0}")]
    Malformed(String),
}

/// Opaque identifier returned by the provider's city search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved city
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    /// Localized city name as reported by the provider
    pub name: String,
}

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub city_name: String,
    pub weather_text: String,
    /// Metric temperature (Celsius)
    pub temperature: f64,
    pub icon_code: u32,
    pub is_day_time: bool,
}

/// Source of weather observations.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a city name to a location. Returns `NotFound` if the search is empty.
    async fn find_location(&self, city: &str) -> Result<Location, WeatherError>;

    /// Fetch the current conditions at a location.
    async fn current_conditions(
        &self,
        location: &Location,
    ) -> Result<WeatherObservation, WeatherError>;
}
