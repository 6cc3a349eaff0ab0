//! AccuWeather client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{Location, LocationId, WeatherError, WeatherObservation, WeatherProvider};
use crate::config::WeatherConfig;

const USER_AGENT: &str = concat!("weather-music-player/", env!("CARGO_PKG_VERSION"));

/// Weather provider backed by the AccuWeather locations and current-conditions APIs.
#[derive(Clone)]
pub struct AccuWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CitySearchResult {
    key: String,
    localized_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CurrentConditions {
    weather_text: String,
    weather_icon: u32,
    is_day_time: bool,
    temperature: Temperature,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Temperature {
    metric: Measurement,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Measurement {
    value: f64,
}

impl AccuWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for AccuWeatherClient {
    #[instrument(skip(self))]
    async fn find_location(&self, city: &str) -> Result<Location, WeatherError> {
        let url = format!("{}/locations/v1/cities/search", self.base_url);
        debug!(%url, "Searching city");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("q", city),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let results: Vec<CitySearchResult> = read_json(response).await?;
        first_location(city, results)
    }

    #[instrument(skip(self, location), fields(location = %location.id))]
    async fn current_conditions(
        &self,
        location: &Location,
    ) -> Result<WeatherObservation, WeatherError> {
        let url = format!("{}/currentconditions/v1/{}", self.base_url, location.id);
        debug!(%url, "Fetching current conditions");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let conditions: Vec<CurrentConditions> = read_json(response).await?;
        observation_for(location, conditions)
    }
}

/// Check the status and decode a JSON body into `T`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, WeatherError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(WeatherError::Status { status, body });
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))
}

fn first_location(city: &str, results: Vec<CitySearchResult>) -> Result<Location, WeatherError> {
    results
        .into_iter()
        .next()
        .map(|r| Location {
            id: LocationId(r.key),
            name: r.localized_name,
        })
        .ok_or_else(|| WeatherError::NotFound(city.to_string()))
}

fn observation_for(
    location: &Location,
    conditions: Vec<CurrentConditions>,
) -> Result<WeatherObservation, WeatherError> {
    let current = conditions.into_iter().next().ok_or_else(|| {
        WeatherError::Malformed(format!("no current conditions for location {}", location.id))
    })?;

    Ok(WeatherObservation {
        city_name: location.name.clone(),
        weather_text: current.weather_text,
        temperature: current.temperature.metric.value,
        icon_code: current.weather_icon,
        is_day_time: current.is_day_time,
    })
}
