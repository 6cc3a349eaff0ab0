//! Request and response bodies for the weather and songs endpoints.

use serde::{Deserialize, Serialize};

use crate::music::TrackSummary;
use crate::weather::WeatherObservation;

/// Form body for `POST /get_weather`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherForm {
    #[serde(default)]
    pub city: Option<String>,
}

/// Form body for `POST /get_songs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongsForm {
    #[serde(default)]
    pub mood: Option<String>,
}

/// Current weather plus the mood phrase it maps to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub city: String,
    pub weather_text: String,
    pub temperature: f64,
    pub icon_code: u32,
    pub is_day_time: bool,
    /// Search phrase to send back to `/get_songs`
    pub music_mood: String,
}

impl WeatherResponse {
    pub fn new(observation: WeatherObservation, music_mood: String) -> Self {
        Self {
            city: observation.city_name,
            weather_text: observation.weather_text,
            temperature: observation.temperature,
            icon_code: observation.icon_code,
            is_day_time: observation.is_day_time,
            music_mood,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongItem {
    pub title: String,
    /// Comma-separated artist names
    pub artist: String,
    pub url: String,
}

impl From<TrackSummary> for SongItem {
    fn from(track: TrackSummary) -> Self {
        Self {
            artist: track.artist_display(),
            title: track.title,
            url: track.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongsResponse {
    pub songs: Vec<SongItem>,
}

/// Trimmed, non-empty value of an optional form field.
pub fn required_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
