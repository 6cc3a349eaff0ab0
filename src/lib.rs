//! Weather Music Player
//!
//! A small web backend that looks up the current weather for a city, maps the
//! conditions and temperature to a music mood through a static rule table, and
//! searches a music provider for tracks matching that mood.

pub mod config;
pub mod error;
pub mod mood;
pub mod music;
pub mod server;
pub mod types;
pub mod weather;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use mood::{resolve, MoodPhrase, MoodRule, MoodTable, FALLBACK_PHRASE};
pub use music::{TrackProvider, TrackSummary};
pub use weather::{WeatherObservation, WeatherProvider};
