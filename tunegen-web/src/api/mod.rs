//! HTTP API handlers for tunegen-web

pub mod chat;
pub mod error;
pub mod health;
pub mod location;
pub mod mood;
pub mod ui;

pub use chat::{chat, save_chat};
pub use error::ApiError;
pub use health::health_routes;
pub use location::get_location_songs;
pub use mood::get_mood_songs;
pub use ui::serve_index;
