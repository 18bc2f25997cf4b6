use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::clients::youtube::{PAGE_SIZE, PlaylistItemResource, YouTubeClient};
use crate::ingest::duration::parse_duration;

/// Hard cap on continuation-token pages followed per fetch. The upstream API
/// has no documented limit, so a hostile or malformed response could otherwise
/// loop forever. 40 pages of 50 items covers any real playlist.
pub const MAX_PLAYLIST_PAGES: usize = 40;

pub const PROVIDER: &str = "youtube";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("YouTube API key is not configured")]
    NotConfigured,

    #[error("Playlist not found or private: {0}")]
    NotFound(String),

    #[error("YouTube fetch failed: {0}")]
    Transport(String),

    #[error("Playlist listing exceeded {MAX_PLAYLIST_PAGES} pages")]
    TooManyPages,
}

/// Playlist-level metadata plus the full ordered member list, as fetched from
/// the remote service. Never persisted partially: a fetch either yields the
/// whole structure or an error.
#[derive(Debug, Clone)]
pub struct FetchedPlaylist {
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub videos: Vec<FetchedVideo>,
}

#[derive(Debug, Clone)]
pub struct FetchedVideo {
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub url: String,
    pub provider: String,
    pub duration: i64,
    pub position: i32,
}

/// Seam between the ingestion services and the remote video platform.
/// Production uses [`YouTubeFetcher`]; tests substitute a stub.
#[async_trait::async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<FetchedPlaylist, FetchError>;
}

pub struct YouTubeFetcher {
    client: Arc<YouTubeClient>,
}

impl YouTubeFetcher {
    pub fn new(client: Arc<YouTubeClient>) -> Self {
        Self { client }
    }

    async fn collect_items(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItemResource>, FetchError> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0.. {
            if page >= MAX_PLAYLIST_PAGES {
                return Err(FetchError::TooManyPages);
            }

            let response = self
                .client
                .list_playlist_items(playlist_id, page_token.as_deref())
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            items.extend(response.items);

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(items)
    }

    /// Duration lookup table keyed by video ID, one request per chunk of 50.
    async fn collect_durations(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, i64>, FetchError> {
        let mut durations = HashMap::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(PAGE_SIZE) {
            let videos = self
                .client
                .get_videos(chunk)
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            for video in videos {
                durations.insert(video.id, parse_duration(&video.content_details.duration));
            }
        }

        Ok(durations)
    }
}

#[async_trait::async_trait]
impl PlaylistSource for YouTubeFetcher {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<FetchedPlaylist, FetchError> {
        if !self.client.is_configured() {
            return Err(FetchError::NotConfigured);
        }

        let snippet = self
            .client
            .get_playlist(playlist_id)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .ok_or_else(|| FetchError::NotFound(playlist_id.to_string()))?;

        let items = self.collect_items(playlist_id).await?;

        let video_ids: Vec<String> = items
            .iter()
            .map(|item| item.snippet.resource_id.video_id.clone())
            .collect();

        let durations = self.collect_durations(&video_ids).await?;

        debug!(
            playlist_id,
            videos = items.len(),
            "Fetched playlist from YouTube"
        );

        let videos = items
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let position = position as i32;
                let snippet = item.snippet;
                let youtube_id = snippet.resource_id.video_id;
                FetchedVideo {
                    url: format!("https://www.youtube.com/watch?v={youtube_id}"),
                    duration: durations.get(&youtube_id).copied().unwrap_or(0),
                    youtube_id,
                    title: snippet.title,
                    description: snippet.description,
                    thumbnail: snippet.thumbnails.best_url(),
                    provider: PROVIDER.to_string(),
                    position,
                }
            })
            .collect();

        Ok(FetchedPlaylist {
            youtube_id: playlist_id.to_string(),
            title: snippet.title,
            description: snippet.description,
            thumbnail: snippet.thumbnails.best_url(),
            videos,
        })
    }
}
