//! Spotify Web API client using the client-credentials flow.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{MusicError, TrackProvider, TrackSummary};
use crate::config::MusicConfig;

const USER_AGENT: &str = concat!("weather-music-player/", env!("CARGO_PKG_VERSION"));

/// Track provider backed by Spotify search.
///
/// An access token is requested for every search; nothing is cached between
/// requests.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    auth_url: String,
    client_id: String,
    client_secret: String,
    market: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    // Spotify occasionally returns null entries for unavailable tracks
    items: Vec<Option<TrackItem>>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    name: String,
    artists: Vec<ArtistRef>,
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

impl SpotifyClient {
    pub fn new(config: &MusicConfig) -> Result<Self, MusicError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            auth_url: config.auth_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            market: config.market.clone(),
        })
    }

    async fn access_token(&self) -> Result<String, MusicError> {
        debug!(url = %self.auth_url, "Requesting access token");

        let response = self
            .client
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = read_json(response).await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl TrackProvider for SpotifyClient {
    #[instrument(skip(self))]
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<TrackSummary>, MusicError> {
        let token = self.access_token().await?;
        let url = format!("{}/search", self.api_url);
        let limit_param = limit.to_string();

        let mut params = vec![
            ("q", query),
            ("type", "track"),
            ("limit", limit_param.as_str()),
        ];
        if let Some(market) = &self.market {
            params.push(("market", market.as_str()));
        }

        debug!(%url, "Searching tracks");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        let search: SearchResponse = read_json(response).await?;
        Ok(summarize(search, limit))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, MusicError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(MusicError::Status { status, body });
    }

    serde_json::from_str(&body).map_err(|e| MusicError::Malformed(e.to_string()))
}

fn summarize(search: SearchResponse, limit: u32) -> Vec<TrackSummary> {
    search
        .tracks
        .items
        .into_iter()
        .flatten()
        .take(limit as usize)
        .map(|item| TrackSummary {
            title: item.name,
            artist_names: item.artists.into_iter().map(|a| a.name).collect(),
            url: item.external_urls.spotify,
        })
        .collect()
}
