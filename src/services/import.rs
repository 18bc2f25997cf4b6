//! Imports a playlist URL as a course: extract the external ID, fetch the
//! remote state, derive a unique slug and persist the playlist with its
//! videos.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::Set;
use thiserror::Error;
use tracing::info;

use crate::db::{InsertOutcome, Store};
use crate::entities::{playlists, videos};
use crate::ingest::fetcher::{FetchError, FetchedPlaylist, PlaylistSource};
use crate::ingest::slug::{slugify, suffixed};
use crate::ingest::url::extract_playlist_id;
use crate::models::course::{Course, Playlist};

/// Suffix probing gives up after this many taken candidates.
const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Base used when a title normalizes to an empty slug.
const FALLBACK_SLUG: &str = "course";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Not a recognizable playlist URL: {0}")]
    InvalidUrl(String),

    #[error("Playlist already imported as '{slug}'")]
    AlreadyImported { slug: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No free slug found for '{0}'")]
    SlugExhausted(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for ImportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

pub struct ImportService {
    store: Store,
    source: Arc<dyn PlaylistSource>,
}

impl ImportService {
    pub fn new(store: Store, source: Arc<dyn PlaylistSource>) -> Self {
        Self { store, source }
    }

    /// Full import flow for a user-supplied URL. The playlist row and its
    /// videos are written in a single transaction: nothing is persisted
    /// unless the whole remote fetch succeeded and every write landed.
    pub async fn import_url(&self, url: &str) -> Result<Course, ImportError> {
        let playlist_id =
            extract_playlist_id(url).ok_or_else(|| ImportError::InvalidUrl(url.to_string()))?;

        if let Some(existing) = self.store.get_playlist_by_youtube_id(&playlist_id).await? {
            return Err(ImportError::AlreadyImported {
                slug: existing.slug,
            });
        }

        let fetched = self.source.fetch_playlist(&playlist_id).await?;

        let playlist = self.create_with_unique_slug(&fetched).await?;

        let videos = self.store.videos_for_playlist(playlist.id).await?;

        info!(
            slug = %playlist.slug,
            videos = videos.len(),
            "Imported playlist {}",
            playlist.youtube_id
        );

        Ok(Course { playlist, videos })
    }

    /// Claims a slug by probing `base`, `base-1`, `base-2`, … The read-then-
    /// insert window means a concurrent request can steal a candidate we saw
    /// as free; the unique constraint catches that and we move to the next
    /// suffix instead of failing. Each attempt carries the video batch into
    /// the same transaction as the playlist row.
    async fn create_with_unique_slug(
        &self,
        fetched: &FetchedPlaylist,
    ) -> Result<Playlist, ImportError> {
        let mut base = slugify(&fetched.title);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }

        let now = Utc::now().to_rfc3339();

        let mut attempt = 0;
        loop {
            let candidate = if attempt == 0 {
                base.clone()
            } else {
                suffixed(&base, attempt)
            };
            attempt += 1;
            if attempt > MAX_SLUG_ATTEMPTS {
                return Err(ImportError::SlugExhausted(fetched.title.clone()));
            }

            if self.store.slug_exists(&candidate).await? {
                continue;
            }

            let model = playlists::ActiveModel {
                youtube_id: Set(fetched.youtube_id.clone()),
                title: Set(fetched.title.clone()),
                description: Set(fetched.description.clone()),
                thumbnail: Set(fetched.thumbnail.clone()),
                slug: Set(candidate),
                auto_sync: Set(false),
                last_synced_at: Set(None),
                created_at: Set(now.clone()),
                ..Default::default()
            };

            let outcome = self
                .store
                .insert_playlist_with_videos(model, |playlist_id| {
                    video_models(fetched, playlist_id, &now)
                })
                .await?;

            match outcome {
                InsertOutcome::Created(playlist) => return Ok(playlist),
                InsertOutcome::SlugTaken => {}
                InsertOutcome::AlreadyImported => {
                    let slug = self
                        .store
                        .get_playlist_by_youtube_id(&fetched.youtube_id)
                        .await?
                        .map(|p| p.slug)
                        .unwrap_or_default();
                    return Err(ImportError::AlreadyImported { slug });
                }
            }
        }
    }
}

fn video_models(
    fetched: &FetchedPlaylist,
    playlist_id: i32,
    created_at: &str,
) -> Vec<videos::ActiveModel> {
    fetched
        .videos
        .iter()
        .map(|v| videos::ActiveModel {
            playlist_id: Set(playlist_id),
            youtube_id: Set(v.youtube_id.clone()),
            title: Set(v.title.clone()),
            description: Set(v.description.clone()),
            thumbnail: Set(v.thumbnail.clone()),
            url: Set(v.url.clone()),
            provider: Set(v.provider.clone()),
            duration: Set(v.duration),
            position: Set(v.position),
            created_at: Set(created_at.to_string()),
            ..Default::default()
        })
        .collect()
}
