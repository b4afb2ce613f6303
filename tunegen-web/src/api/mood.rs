//! Mood-based recommendation endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tunegen_common::db::queries;

use crate::api::error::ApiError;
use crate::lastfm::{Song, DEFAULT_FETCH_LIMIT};
use crate::tags;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MoodSongsRequest {
    pub username: String,
    pub mood: String,
    /// Optional free-text genre filter, passed through to the lookup API
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub songs: Vec<Song>,
}

/// POST /get_mood_songs
///
/// Resolves the mood (plus optional genre) to a query tag, fetches songs,
/// and records one preference row per returned song. A failed lookup is
/// not an error: the song list is simply empty and nothing is recorded.
pub async fn get_mood_songs(
    State(state): State<AppState>,
    Json(req): Json<MoodSongsRequest>,
) -> Result<Json<SongsResponse>, ApiError> {
    let tag = tags::resolve_mood_tag(&req.mood, req.genre.as_deref());
    let songs = state.songs.fetch(&tag, DEFAULT_FETCH_LIMIT).await;

    // All writes for this request commit or roll back together
    let mut tx = state.db.begin().await?;
    let user_id = queries::ensure_user(&mut tx, &req.username).await?;
    for song in &songs {
        queries::insert_preference(&mut tx, user_id, &req.mood, &song.name, &song.artist).await?;
    }
    tx.commit().await?;

    Ok(Json(SongsResponse { songs }))
}
