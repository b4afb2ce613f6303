//! Database queries
//!
//! Write operations take `&mut SqliteConnection` so callers can group the
//! writes of one request into a single transaction. Read operations run
//! directly against the pool.

use crate::db::models::{ChatMessage, Preference, Sender};
use crate::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};

/// Insert-if-absent by username, then read back the id.
///
/// Safe to call concurrently for the same username: the conflicting
/// insert is ignored and both callers read the same row.
pub async fn ensure_user(conn: &mut SqliteConnection, username: &str) -> Result<i64> {
    sqlx::query("INSERT OR IGNORE INTO users (username) VALUES (?)")
        .bind(username)
        .execute(&mut *conn)
        .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

/// Append one preference row for a recommended song
pub async fn insert_preference(
    conn: &mut SqliteConnection,
    user_id: i64,
    label: &str,
    song_title: &str,
    artist: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO preferences (user_id, mood, song_title, artist) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(label)
        .bind(song_title)
        .bind(artist)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Append one chat row; the timestamp is assigned by SQLite
pub async fn insert_chat_message(
    conn: &mut SqliteConnection,
    user_id: i64,
    sender: Sender,
    message: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO chat_history (user_id, sender, message) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(sender.as_str())
        .bind(message)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Look up a user id without creating the user
pub async fn find_user(pool: &SqlitePool, username: &str) -> Result<Option<i64>> {
    let id = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Chat history for one user, oldest first
///
/// CURRENT_TIMESTAMP has one-second granularity, so the id is the
/// tiebreak that keeps insertion order within a second.
pub async fn list_chat_history(pool: &SqlitePool, user_id: i64) -> Result<Vec<ChatMessage>> {
    let rows = sqlx::query_as::<_, (i64, i64, String, String, String)>(
        "SELECT id, user_id, sender, message, timestamp FROM chat_history
         WHERE user_id = ? ORDER BY timestamp ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, user_id, sender, message, timestamp)| {
            let sender = Sender::parse(&sender)
                .ok_or_else(|| Error::Internal(format!("unknown sender in chat row {id}")))?;
            Ok(ChatMessage {
                id,
                user_id,
                sender,
                message,
                timestamp,
            })
        })
        .collect()
}

/// Recorded preferences for one user, in insertion order
pub async fn list_preferences(pool: &SqlitePool, user_id: i64) -> Result<Vec<Preference>> {
    let rows = sqlx::query_as::<_, (i64, i64, String, String, String)>(
        "SELECT id, user_id, mood, song_title, artist FROM preferences
         WHERE user_id = ? ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, user_id, mood, song_title, artist)| Preference {
            id,
            user_id,
            mood,
            song_title,
            artist,
        })
        .collect())
}
