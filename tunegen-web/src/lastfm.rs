//! Last.fm song lookup client
//!
//! Queries the Last.fm tag API for top tracks. The lookup seam is a trait
//! so handlers and tests can substitute the client.
//!
//! # API Reference
//! - Endpoint: http://ws.audioscrobbler.com/2.0/
//! - Method: tag.gettoptracks (tag, api_key, format=json, limit)
//!
//! Lookup failures never reach the caller: any network error, non-success
//! status, malformed body, or API-reported error degrades to an empty
//! result and a warning in the log.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Last.fm API base URL
pub const LASTFM_API_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Timeout for Last.fm API requests (the API has no contract for slow
/// responses; a hung lookup must not hang the request)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How many songs a recommendation fetches by default
pub const DEFAULT_FETCH_LIMIT: u32 = 5;

/// One recommended song as returned by the lookup API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub artist: String,
    pub url: String,
}

/// Song lookup seam
#[async_trait]
pub trait SongLookup: Send + Sync {
    /// Fetch up to `limit` songs for a tag, in API response order.
    ///
    /// Infallible by contract: failures degrade to an empty list.
    async fn fetch(&self, tag: &str, limit: u32) -> Vec<Song>;
}

/// Last.fm implementation of [`SongLookup`]
pub struct LastFmClient {
    http_client: Client,
    api_key: String,
}

impl LastFmClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
        }
    }

    /// Query tag.gettoptracks; one GET, no retry
    async fn query_top_tracks(&self, tag: &str, limit: u32) -> Result<Vec<Song>> {
        let limit = limit.to_string();
        let response = self
            .http_client
            .get(LASTFM_API_URL)
            .query(&[
                ("method", "tag.gettoptracks"),
                ("tag", tag),
                ("api_key", &self.api_key),
                ("format", "json"),
                ("limit", &limit),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Last.fm request failed with status {}", response.status());
        }

        let body: TopTracksResponse = response.json().await?;
        songs_from_response(body)
    }
}

#[async_trait]
impl SongLookup for LastFmClient {
    async fn fetch(&self, tag: &str, limit: u32) -> Vec<Song> {
        match self.query_top_tracks(tag, limit).await {
            Ok(songs) => songs,
            Err(e) => {
                warn!("Last.fm lookup failed for tag '{}': {:#}", tag, e);
                Vec::new()
            }
        }
    }
}

// Wire format. Last.fm either returns {"tracks": {"track": [..]}} or an
// {"error": N, "message": ".."} envelope; every field is optional so a
// partial body parses instead of failing the whole response.

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    error: Option<i64>,
    message: Option<String>,
    tracks: Option<TracksContainer>,
}

#[derive(Debug, Deserialize)]
struct TracksContainer {
    track: Option<Vec<Track>>,
}

#[derive(Debug, Deserialize)]
struct Track {
    name: Option<String>,
    url: Option<String>,
    artist: Option<TrackArtist>,
}

#[derive(Debug, Deserialize)]
struct TrackArtist {
    name: Option<String>,
}

/// Flatten the wire response into songs, preserving response order.
/// Tracks missing a name, artist, or url are skipped.
fn songs_from_response(body: TopTracksResponse) -> Result<Vec<Song>> {
    if let Some(code) = body.error {
        anyhow::bail!(
            "Last.fm API error {}: {}",
            code,
            body.message.unwrap_or_else(|| "no message".to_string())
        );
    }

    let tracks = body
        .tracks
        .and_then(|t| t.track)
        .unwrap_or_default();

    Ok(tracks
        .into_iter()
        .filter_map(|t| {
            Some(Song {
                name: t.name?,
                artist: t.artist?.name?,
                url: t.url?,
            })
        })
        .collect())
}
