//! Chat endpoints
//!
//! `/chat` runs the keyword scan over the inbound message and answers
//! with songs when a mood or location label is recognized; `/save_chat`
//! is a pure history append used by the UI.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tunegen_common::db::models::Sender;
use tunegen_common::db::queries;

use crate::api::error::ApiError;
use crate::lastfm::{Song, DEFAULT_FETCH_LIMIT};
use crate::tags::{self, LabelMatch};
use crate::AppState;

/// Reply when no mood or location keyword is recognized
pub const DEFAULT_REPLY: &str = "Got it! Want me to find songs for that?";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub songs: Vec<Song>,
}

#[derive(Debug, Deserialize)]
pub struct SaveChatRequest {
    pub username: String,
    pub sender: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SaveChatResponse {
    pub status: String,
}

/// POST /chat
///
/// Records the inbound message verbatim, scans it for mood labels first
/// and location labels second (first match wins), fetches songs for a
/// match, and records only the first returned song as a preference.
/// The generated reply is appended to the history as the bot side.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let (reply, songs, label) = match tags::scan_message(&req.message) {
        Some(LabelMatch::Mood(mood)) => {
            let songs = state.songs.fetch(mood.tag(), DEFAULT_FETCH_LIMIT).await;
            (
                format!("Here are some {} songs!", mood.label()),
                songs,
                Some(mood.label()),
            )
        }
        Some(LabelMatch::Location(location)) => {
            let songs = state.songs.fetch(location.tag(), DEFAULT_FETCH_LIMIT).await;
            (
                format!("Here are some songs for a {} vibe!", location.label()),
                songs,
                Some(location.label()),
            )
        }
        None => (DEFAULT_REPLY.to_string(), Vec::new(), None),
    };

    let mut tx = state.db.begin().await?;
    let user_id = queries::ensure_user(&mut tx, &req.username).await?;
    queries::insert_chat_message(&mut tx, user_id, Sender::User, &req.message).await?;

    if let (Some(label), Some(first)) = (label, songs.first()) {
        queries::insert_preference(&mut tx, user_id, label, &first.name, &first.artist).await?;
    }

    queries::insert_chat_message(&mut tx, user_id, Sender::Bot, &reply).await?;
    tx.commit().await?;

    Ok(Json(ChatResponse {
        response: reply,
        songs,
    }))
}

/// POST /save_chat
///
/// Pure append, no external calls. An unknown sender value is rejected.
pub async fn save_chat(
    State(state): State<AppState>,
    Json(req): Json<SaveChatRequest>,
) -> Result<Json<SaveChatResponse>, ApiError> {
    let sender = Sender::parse(&req.sender)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown sender: {}", req.sender)))?;

    let mut tx = state.db.begin().await?;
    let user_id = queries::ensure_user(&mut tx, &req.username).await?;
    queries::insert_chat_message(&mut tx, user_id, sender, &req.message).await?;
    tx.commit().await?;

    Ok(Json(SaveChatResponse {
        status: "success".to_string(),
    }))
}
