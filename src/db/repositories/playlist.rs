use crate::entities::{playlists, prelude::*, videos};
use crate::models::course::Playlist;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

pub struct PlaylistRepository {
    conn: DatabaseConnection,
}

/// Outcome of attempting to claim a slug during playlist creation.
pub enum InsertOutcome {
    Created(Playlist),
    /// The unique constraint on `slug` fired; retry with the next candidate.
    SlugTaken,
    /// The unique constraint on `youtube_id` fired; the playlist was imported
    /// concurrently by another request.
    AlreadyImported,
}

impl PlaylistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a playlist row together with its videos in one transaction;
    /// either both land or neither does. `build_videos` receives the new
    /// playlist's ID once the row exists. A unique-constraint hit on the
    /// playlist insert is reported through [`InsertOutcome`] so the import
    /// service can react (retry next slug candidate vs. surface a conflict).
    pub async fn insert_with_videos<F>(
        &self,
        model: playlists::ActiveModel,
        build_videos: F,
    ) -> anyhow::Result<InsertOutcome>
    where
        F: FnOnce(i32) -> Vec<videos::ActiveModel> + Send,
    {
        let txn = self.conn.begin().await?;

        let created = match Playlists::insert(model).exec_with_returning(&txn).await {
            Ok(created) => created,
            Err(err) => {
                txn.rollback().await?;
                return match err.sql_err() {
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                        if msg.contains("slug") {
                            Ok(InsertOutcome::SlugTaken)
                        } else {
                            Ok(InsertOutcome::AlreadyImported)
                        }
                    }
                    _ => Err(err.into()),
                };
            }
        };

        if let Err(err) = super::video::insert_many_on(&txn, build_videos(created.id)).await {
            txn.rollback().await?;
            return Err(err);
        }

        txn.commit().await?;
        Ok(InsertOutcome::Created(created.into()))
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<Playlist>> {
        let result = Playlists::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Playlist::from))
    }

    pub async fn get_by_youtube_id(&self, youtube_id: &str) -> anyhow::Result<Option<Playlist>> {
        let result = Playlists::find()
            .filter(playlists::Column::YoutubeId.eq(youtube_id))
            .one(&self.conn)
            .await?;
        Ok(result.map(Playlist::from))
    }

    pub async fn get_by_slug(&self, slug: &str) -> anyhow::Result<Option<Playlist>> {
        let result = Playlists::find()
            .filter(playlists::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(result.map(Playlist::from))
    }

    pub async fn slug_exists(&self, slug: &str) -> anyhow::Result<bool> {
        let count = Playlists::find()
            .filter(playlists::Column::Slug.eq(slug))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn list_all(&self) -> anyhow::Result<Vec<Playlist>> {
        let rows = Playlists::find()
            .order_by_asc(playlists::Column::Title)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Playlist::from).collect())
    }

    pub async fn list_auto_sync(&self) -> anyhow::Result<Vec<Playlist>> {
        let rows = Playlists::find()
            .filter(playlists::Column::AutoSync.eq(true))
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Playlist::from).collect())
    }

    /// Refreshes the mutable metadata columns and the sync timestamp after a
    /// successful reconciliation. The slug is never touched.
    pub async fn update_sync_state(
        &self,
        id: i32,
        title: &str,
        description: &str,
        thumbnail: Option<&str>,
        last_synced_at: &str,
    ) -> anyhow::Result<()> {
        let model = playlists::ActiveModel {
            id: Set(id),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            thumbnail: Set(thumbnail.map(ToString::to_string)),
            last_synced_at: Set(Some(last_synced_at.to_string())),
            ..Default::default()
        };
        Playlists::update(model).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn set_auto_sync(&self, id: i32, enabled: bool) -> anyhow::Result<bool> {
        let result = Playlists::update_many()
            .col_expr(
                playlists::Column::AutoSync,
                sea_orm::sea_query::Expr::value(enabled),
            )
            .filter(playlists::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn remove(&self, id: i32) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await?;

        videos::Entity::delete_many()
            .filter(videos::Column::PlaylistId.eq(id))
            .exec(&txn)
            .await?;

        let result = Playlists::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed playlist with ID: {}", id);
        }
        Ok(removed)
    }
}
