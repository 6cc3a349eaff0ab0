use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from an optional file and environment variables.
///
/// All settings can be configured via environment variables with the `WEATHER_MUSIC_` prefix.
/// For example: `WEATHER_MUSIC_SERVER__PORT=8080`, `WEATHER_MUSIC_WEATHER__API_KEY=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Music provider configuration
    #[serde(default)]
    pub music: MusicConfig,

    /// Mood mapping table configuration
    #[serde(default)]
    pub mood: MoodConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// AccuWeather API key
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the weather service
    #[serde(default = "default_weather_url")]
    pub base_url: String,

    /// Language for localized city names and weather text
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_url(),
            language: default_language(),
        }
    }
}

fn default_weather_url() -> String {
    "http://dataservice.accuweather.com".to_string()
}

fn default_language() -> String {
    "en-us".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MusicConfig {
    /// Spotify application client ID
    #[serde(default)]
    pub client_id: String,

    /// Spotify application client secret
    #[serde(default)]
    pub client_secret: String,

    /// Base URL of the Web API
    #[serde(default = "default_music_api_url")]
    pub api_url: String,

    /// Token endpoint for the client-credentials flow
    #[serde(default = "default_music_auth_url")]
    pub auth_url: String,

    /// Optional ISO 3166-1 country code to restrict search results
    #[serde(default)]
    pub market: Option<String>,

    /// Number of tracks returned per search
    #[serde(default = "default_track_limit")]
    pub track_limit: u32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_url: default_music_api_url(),
            auth_url: default_music_auth_url(),
            market: None,
            track_limit: default_track_limit(),
        }
    }
}

fn default_music_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_music_auth_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_track_limit() -> u32 {
    5
}

/// Largest page size the search endpoint accepts.
pub const MAX_TRACK_LIMIT: u32 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct MoodConfig {
    /// Path to the CSV mood mapping table. Row order is significant.
    #[serde(default = "default_table_path")]
    pub table_path: PathBuf,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            table_path: default_table_path(),
        }
    }
}

fn default_table_path() -> PathBuf {
    PathBuf::from("data/mood_mapping.csv")
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and environment variables.
    ///
    /// The file path can be overridden with `WEATHER_MUSIC_CONFIG`. Environment
    /// variables take precedence and use double underscores for nested values:
    /// - `WEATHER_MUSIC_WEATHER__API_KEY` -> weather.api_key
    /// - `WEATHER_MUSIC_MUSIC__CLIENT_ID` -> music.client_id
    /// - `WEATHER_MUSIC_SERVER__PORT` -> server.port
    ///
    /// Values stay strings until deserialized so numeric-looking keys are not
    /// reinterpreted. Missing provider credentials are an error.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("WEATHER_MUSIC_CONFIG").unwrap_or_else(|_| "config".to_string());

        let config = Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("WEATHER_MUSIC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every provider credential is present and the track limit is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("weather.api_key", &self.weather.api_key),
            ("music.client_id", &self.music.client_id),
            ("music.client_secret", &self.music.client_secret),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::NotFound(key.to_string()));
            }
        }

        if !(1..=MAX_TRACK_LIMIT).contains(&self.music.track_limit) {
            return Err(ConfigError::Message(format!(
                "music.track_limit must be between 1 and {MAX_TRACK_LIMIT}, got {}",
                self.music.track_limit
            )));
        }

        Ok(())
    }
}
