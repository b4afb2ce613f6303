//! Database models

use serde::{Deserialize, Serialize};

/// Registered user, created on first reference by any handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A song recommended to a user for a given mood or location label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    pub id: i64,
    pub user_id: i64,
    /// Mood or location label the recommendation was made for
    pub mood: String,
    pub song_title: String,
    pub artist: String,
}

/// One chat line, either side of the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub user_id: i64,
    pub sender: Sender,
    pub message: String,
    /// Server-assigned creation time (SQLite CURRENT_TIMESTAMP, UTC)
    pub timestamp: String,
}

/// Which side of the conversation a chat message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    /// Parse the stored/wire representation ("user" / "bot")
    pub fn parse(s: &str) -> Option<Sender> {
        match s {
            "user" => Some(Sender::User),
            "bot" => Some(Sender::Bot),
            _ => None,
        }
    }
}
