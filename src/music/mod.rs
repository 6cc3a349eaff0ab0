//! Track lookup.
//!
//! Searches the music provider for tracks matching a mood phrase.

mod spotify;

pub use spotify::SpotifyClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for track searches
#[derive(Debug, thiserror::Error)]
pub enum MusicError {
    #[error("Music request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Music service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected music payload: {0}")]
    Malformed(String),
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub title: String,
    pub artist_names: Vec<String>,
    /// Link to the track on the provider's web player
    pub url: String,
}

impl TrackSummary {
    /// Artist names joined for display, e.g. `"Daft Punk, Pharrell Williams"`.
    pub fn artist_display(&self) -> String {
        self.artist_names.join(", ")
    }
}

/// Source of track search results.
#[async_trait]
pub trait TrackProvider: Send + Sync {
    /// Return at most `limit` tracks for `query`, in provider ranking order.
    async fn search_tracks(&self, query: &str, limit: u32)
        -> Result<Vec<TrackSummary>, MusicError>;
}
