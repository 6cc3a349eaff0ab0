//! Track search route handler.

use axum::{extract::State, Json};
use tracing::debug;

use crate::error::AppError;
use crate::types::{required_field, SongItem, SongsForm, SongsResponse};

use super::extractors::FormExtractor;
use super::AppState;

/// POST /get_songs
///
/// Search tracks for the `mood` form field.
pub async fn get_songs(
    State(state): State<AppState>,
    FormExtractor(form): FormExtractor<SongsForm>,
) -> Result<Json<SongsResponse>, AppError> {
    let mood = required_field(form.mood.as_deref()).ok_or(AppError::MissingInput("mood"))?;

    let tracks = state
        .music
        .search_tracks(mood, state.config.music.track_limit)
        .await?;
    debug!(mood, count = tracks.len(), "Track search complete");

    let songs = tracks.into_iter().map(SongItem::from).collect();
    Ok(Json(SongsResponse { songs }))
}
