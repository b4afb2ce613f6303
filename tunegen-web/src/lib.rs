//! tunegen-web library - HTTP service for mood and location based song
//! recommendations
//!
//! Ties together the tag resolver, the Last.fm lookup client, the
//! location classifier stub, and the persistence store behind five
//! endpoints plus health.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod classifier;
pub mod lastfm;
pub mod tags;

use classifier::ClassifyLocation;
use lastfm::SongLookup;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Song lookup client (Last.fm in production, a stub in tests)
    pub songs: Arc<dyn SongLookup>,
    /// Location classifier (random stub until a real model exists)
    pub classifier: Arc<dyn ClassifyLocation>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db: SqlitePool,
        songs: Arc<dyn SongLookup>,
        classifier: Arc<dyn ClassifyLocation>,
    ) -> Self {
        Self {
            db,
            songs,
            classifier,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/get_mood_songs", post(api::get_mood_songs))
        .route("/get_location_songs", post(api::get_location_songs))
        .route("/chat", post(api::chat))
        .route("/save_chat", post(api::save_chat))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
