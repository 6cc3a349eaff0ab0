//! Weather lookup route handler.

use axum::{extract::State, Json};
use tracing::info;

use crate::error::AppError;
use crate::types::{required_field, WeatherForm, WeatherResponse};

use super::extractors::FormExtractor;
use super::AppState;

/// POST /get_weather
///
/// Look up the current weather for the `city` form field and map it to a
/// music mood phrase.
pub async fn get_weather(
    State(state): State<AppState>,
    FormExtractor(form): FormExtractor<WeatherForm>,
) -> Result<Json<WeatherResponse>, AppError> {
    let city = required_field(form.city.as_deref()).ok_or(AppError::MissingInput("city"))?;

    let location = state.weather.find_location(city).await?;
    let observation = state.weather.current_conditions(&location).await?;

    let mood = state
        .moods
        .resolve(&observation.weather_text, observation.temperature);

    info!(
        city = %observation.city_name,
        weather = %observation.weather_text,
        temperature = observation.temperature,
        mood = %mood,
        fallback = mood.is_fallback(),
        "Resolved music mood"
    );

    Ok(Json(WeatherResponse::new(observation, mood.into_string())))
}
