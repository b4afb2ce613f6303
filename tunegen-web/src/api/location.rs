//! Location-based recommendation endpoint (image upload)

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tunegen_common::db::queries;

use crate::api::error::ApiError;
use crate::lastfm::{Song, DEFAULT_FETCH_LIMIT};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LocationSongsResponse {
    pub songs: Vec<Song>,
    /// Detected location label
    pub location: String,
}

/// POST /get_location_songs
///
/// Multipart form with a `username` field and an `image` file part. The
/// classifier turns the image into a location label; songs for the
/// mapped tag are fetched and recorded like the mood flow.
pub async fn get_location_songs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LocationSongsResponse>, ApiError> {
    let mut username: Option<String> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable username field: {}", e)))?;
                username = Some(text);
            }
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable image field: {}", e)))?;
                image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let username = username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required field: username".to_string()))?;
    let image =
        image.ok_or_else(|| ApiError::BadRequest("Missing required field: image".to_string()))?;

    let location = state.classifier.classify(&image);
    let songs = state.songs.fetch(location.tag(), DEFAULT_FETCH_LIMIT).await;

    let mut tx = state.db.begin().await?;
    let user_id = queries::ensure_user(&mut tx, &username).await?;
    for song in &songs {
        queries::insert_preference(&mut tx, user_id, location.label(), &song.name, &song.artist)
            .await?;
    }
    tx.commit().await?;

    Ok(Json(LocationSongsResponse {
        songs,
        location: location.label().to_string(),
    }))
}
