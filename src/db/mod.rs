use crate::entities::{playlists, videos};
use crate::models::course::{Playlist, Video};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::playlist::InsertOutcome;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every new in-memory connection starts from an empty database, so a
        // pool larger than one would hand out connections the migrations
        // never ran on.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn playlist_repo(&self) -> repositories::playlist::PlaylistRepository {
        repositories::playlist::PlaylistRepository::new(self.conn.clone())
    }

    fn video_repo(&self) -> repositories::video::VideoRepository {
        repositories::video::VideoRepository::new(self.conn.clone())
    }

    pub async fn insert_playlist_with_videos<F>(
        &self,
        model: playlists::ActiveModel,
        build_videos: F,
    ) -> Result<InsertOutcome>
    where
        F: FnOnce(i32) -> Vec<videos::ActiveModel> + Send,
    {
        self.playlist_repo()
            .insert_with_videos(model, build_videos)
            .await
    }

    pub async fn get_playlist(&self, id: i32) -> Result<Option<Playlist>> {
        self.playlist_repo().get(id).await
    }

    pub async fn get_playlist_by_youtube_id(&self, youtube_id: &str) -> Result<Option<Playlist>> {
        self.playlist_repo().get_by_youtube_id(youtube_id).await
    }

    pub async fn get_playlist_by_slug(&self, slug: &str) -> Result<Option<Playlist>> {
        self.playlist_repo().get_by_slug(slug).await
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.playlist_repo().slug_exists(slug).await
    }

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.playlist_repo().list_all().await
    }

    pub async fn list_auto_sync_playlists(&self) -> Result<Vec<Playlist>> {
        self.playlist_repo().list_auto_sync().await
    }

    pub async fn update_playlist_sync_state(
        &self,
        id: i32,
        title: &str,
        description: &str,
        thumbnail: Option<&str>,
        last_synced_at: &str,
    ) -> Result<()> {
        self.playlist_repo()
            .update_sync_state(id, title, description, thumbnail, last_synced_at)
            .await
    }

    pub async fn set_playlist_auto_sync(&self, id: i32, enabled: bool) -> Result<bool> {
        self.playlist_repo().set_auto_sync(id, enabled).await
    }

    pub async fn remove_playlist(&self, id: i32) -> Result<bool> {
        self.playlist_repo().remove(id).await
    }

    pub async fn insert_videos(&self, models: Vec<videos::ActiveModel>) -> Result<u64> {
        self.video_repo().insert_many(models).await
    }

    pub async fn videos_for_playlist(&self, playlist_id: i32) -> Result<Vec<Video>> {
        self.video_repo().list_for_playlist(playlist_id).await
    }

    pub async fn video_youtube_ids(&self, playlist_id: i32) -> Result<HashSet<String>> {
        self.video_repo().youtube_ids_for_playlist(playlist_id).await
    }

    pub async fn max_video_position(&self, playlist_id: i32) -> Result<Option<i32>> {
        self.video_repo().max_position(playlist_id).await
    }

    pub async fn video_counts_by_playlist(&self) -> Result<HashMap<i32, i64>> {
        self.video_repo().counts_by_playlist().await
    }
}
