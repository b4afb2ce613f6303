//! Tests for database initialization and the store operations
//!
//! Covers automatic database creation, idempotent user upsert, and the
//! append-only preference / chat history writes.

use tunegen_common::db::init::{init_database, init_memory_database};
use tunegen_common::db::models::Sender;
use tunegen_common::db::queries::{
    ensure_user, find_user, insert_chat_message, insert_preference, list_chat_history,
    list_preferences,
};

#[tokio::test]
async fn database_created_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tunegen.db");

    let result = init_database(&db_path).await;
    assert!(
        result.is_ok(),
        "Database initialization failed: {:?}",
        result.err()
    );
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tunegen.db");

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    // Second open must succeed and keep existing rows
    let pool2 = init_database(&db_path).await;
    assert!(
        pool2.is_ok(),
        "Failed to open existing database: {:?}",
        pool2.err()
    );
}

#[tokio::test]
async fn schema_creation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tunegen.db");

    let pool = init_database(&db_path).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let user_id = ensure_user(&mut conn, "alice").await.unwrap();
    drop(conn);
    pool.close().await;

    // Re-running init against the same file must not clobber data
    let pool = init_database(&db_path).await.unwrap();
    let found = find_user(&pool, "alice").await.unwrap();
    assert_eq!(found, Some(user_id));
}

#[tokio::test]
async fn ensure_user_is_idempotent() {
    let pool = init_memory_database().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let first = ensure_user(&mut conn, "alice").await.unwrap();
    let second = ensure_user(&mut conn, "alice").await.unwrap();
    assert_eq!(first, second, "Same username must resolve to the same id");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind("alice")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(count, 1, "Repeated upsert must not duplicate the user row");
}

#[tokio::test]
async fn distinct_usernames_get_distinct_ids() {
    let pool = init_memory_database().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let alice = ensure_user(&mut conn, "alice").await.unwrap();
    let bob = ensure_user(&mut conn, "bob").await.unwrap();
    assert_ne!(alice, bob);
    drop(conn);

    assert_eq!(find_user(&pool, "bob").await.unwrap(), Some(bob));
    assert_eq!(find_user(&pool, "carol").await.unwrap(), None);
}

#[tokio::test]
async fn preferences_append_in_order() {
    let pool = init_memory_database().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let user_id = ensure_user(&mut conn, "alice").await.unwrap();

    insert_preference(&mut conn, user_id, "Happy", "Good Vibrations", "The Beach Boys")
        .await
        .unwrap();
    insert_preference(&mut conn, user_id, "Beach", "Kokomo", "The Beach Boys")
        .await
        .unwrap();
    drop(conn);

    let prefs = list_preferences(&pool, user_id).await.unwrap();
    assert_eq!(prefs.len(), 2);
    assert_eq!(prefs[0].mood, "Happy");
    assert_eq!(prefs[0].song_title, "Good Vibrations");
    assert_eq!(prefs[1].mood, "Beach");
    assert_eq!(prefs[1].artist, "The Beach Boys");
}

#[tokio::test]
async fn chat_history_keeps_insertion_order() {
    let pool = init_memory_database().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let user_id = ensure_user(&mut conn, "alice").await.unwrap();

    insert_chat_message(&mut conn, user_id, Sender::User, "I feel happy today")
        .await
        .unwrap();
    insert_chat_message(&mut conn, user_id, Sender::Bot, "Here are some Happy songs!")
        .await
        .unwrap();
    drop(conn);

    let history = list_chat_history(&pool, user_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].sender, Sender::User);
    assert_eq!(history[0].message, "I feel happy today");
    assert_eq!(history[1].sender, Sender::Bot);
    assert!(!history[1].timestamp.is_empty(), "Timestamp is server-assigned");
}

#[tokio::test]
async fn dependent_insert_requires_existing_user() {
    let pool = init_memory_database().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    // No user with id 42 exists, the foreign key must reject the row
    let result = insert_preference(&mut conn, 42, "Happy", "Nowhere Man", "The Beatles").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn writes_in_rolled_back_transaction_leave_no_rows() {
    let pool = init_memory_database().await.unwrap();

    {
        let mut tx = pool.begin().await.unwrap();
        let user_id = ensure_user(&mut tx, "alice").await.unwrap();
        insert_preference(&mut tx, user_id, "Calm", "Albatross", "Fleetwood Mac")
            .await
            .unwrap();
        // Dropped without commit
    }

    assert_eq!(find_user(&pool, "alice").await.unwrap(), None);
}
