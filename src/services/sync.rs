//! Reconciles an imported playlist against its current remote state.
//!
//! Only videos whose external ID is not yet present are inserted, appended
//! after the current maximum position in their fetched relative order.
//! Existing videos are never touched or reordered.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::Set;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::Store;
use crate::entities::videos;
use crate::ingest::fetcher::{FetchError, PlaylistSource};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(i32),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Outcome of an unattended sweep over all auto-sync playlists.
#[derive(Debug, Default)]
pub struct SyncSweepStats {
    pub playlists: usize,
    pub added: u64,
    pub failed: usize,
}

pub struct SyncService {
    store: Store,
    source: Arc<dyn PlaylistSource>,
}

impl SyncService {
    pub fn new(store: Store, source: Arc<dyn PlaylistSource>) -> Self {
        Self { store, source }
    }

    /// Re-fetches the playlist and inserts the videos that are new since the
    /// last import or sync. Returns the number of rows actually written; the
    /// insert is conflict-protected, so an overlapping sync computing the same
    /// diff cannot double-insert.
    pub async fn sync_playlist(&self, playlist_id: i32) -> Result<u64, SyncError> {
        let playlist = self
            .store
            .get_playlist(playlist_id)
            .await?
            .ok_or(SyncError::PlaylistNotFound(playlist_id))?;

        let fetched = self.source.fetch_playlist(&playlist.youtube_id).await?;

        let existing = self.store.video_youtube_ids(playlist_id).await?;
        let next_position = self
            .store
            .max_video_position(playlist_id)
            .await?
            .map_or(0, |p| p + 1);

        let now = Utc::now().to_rfc3339();
        let models: Vec<videos::ActiveModel> = fetched
            .videos
            .iter()
            .filter(|v| !existing.contains(&v.youtube_id))
            .enumerate()
            .map(|(offset, v)| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let position = next_position + offset as i32;
                videos::ActiveModel {
                    playlist_id: Set(playlist_id),
                    youtube_id: Set(v.youtube_id.clone()),
                    title: Set(v.title.clone()),
                    description: Set(v.description.clone()),
                    thumbnail: Set(v.thumbnail.clone()),
                    url: Set(v.url.clone()),
                    provider: Set(v.provider.clone()),
                    duration: Set(v.duration),
                    position: Set(position),
                    created_at: Set(now.clone()),
                    ..Default::default()
                }
            })
            .collect();

        let added = self.store.insert_videos(models).await?;

        self.store
            .update_playlist_sync_state(
                playlist_id,
                &fetched.title,
                &fetched.description,
                fetched.thumbnail.as_deref(),
                &now,
            )
            .await?;

        info!(
            playlist_id,
            slug = %playlist.slug,
            added,
            "Playlist synced"
        );

        Ok(added)
    }

    /// Toggles the persisted auto-sync flag. Orthogonal to manual sync: a
    /// disabled playlist can still be synced on demand.
    pub async fn set_auto_sync(&self, playlist_id: i32, enabled: bool) -> Result<(), SyncError> {
        let updated = self
            .store
            .set_playlist_auto_sync(playlist_id, enabled)
            .await?;
        if !updated {
            return Err(SyncError::PlaylistNotFound(playlist_id));
        }
        Ok(())
    }

    /// Syncs every playlist flagged for auto-sync. One failing playlist is
    /// logged and skipped; it must not abort the rest of the sweep.
    pub async fn sync_all_auto(&self) -> anyhow::Result<SyncSweepStats> {
        let playlists = self.store.list_auto_sync_playlists().await?;
        let mut stats = SyncSweepStats {
            playlists: playlists.len(),
            ..Default::default()
        };

        for playlist in playlists {
            match self.sync_playlist(playlist.id).await {
                Ok(added) => stats.added += added,
                Err(e) => {
                    warn!(
                        playlist_id = playlist.id,
                        slug = %playlist.slug,
                        error = %e,
                        "Auto-sync failed for playlist"
                    );
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}
