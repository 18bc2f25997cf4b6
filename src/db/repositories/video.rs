use std::collections::{HashMap, HashSet};

use crate::entities::{prelude::*, videos};
use crate::models::course::Video;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Conflict-protected batch insert, usable on a plain connection or inside a
/// transaction. Rows whose `(playlist_id, youtube_id)` pair already exists
/// are silently skipped; the return value counts rows actually written.
pub(crate) async fn insert_many_on<C: ConnectionTrait>(
    conn: &C,
    models: Vec<videos::ActiveModel>,
) -> anyhow::Result<u64> {
    if models.is_empty() {
        return Ok(0);
    }

    let result = Videos::insert_many(models)
        .on_conflict(
            OnConflict::columns([videos::Column::PlaylistId, videos::Column::YoutubeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await;

    match result {
        Ok(inserted) => Ok(inserted),
        // Every row conflicted away; that is a successful no-op here.
        Err(sea_orm::DbErr::RecordNotInserted) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

pub struct VideoRepository {
    conn: DatabaseConnection,
}

impl VideoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert_many(&self, models: Vec<videos::ActiveModel>) -> anyhow::Result<u64> {
        insert_many_on(&self.conn, models).await
    }

    pub async fn list_for_playlist(&self, playlist_id: i32) -> anyhow::Result<Vec<Video>> {
        let rows = Videos::find()
            .filter(videos::Column::PlaylistId.eq(playlist_id))
            .order_by_asc(videos::Column::Position)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Video::from).collect())
    }

    pub async fn youtube_ids_for_playlist(
        &self,
        playlist_id: i32,
    ) -> anyhow::Result<HashSet<String>> {
        let ids: Vec<String> = Videos::find()
            .select_only()
            .column(videos::Column::YoutubeId)
            .filter(videos::Column::PlaylistId.eq(playlist_id))
            .into_tuple()
            .all(&self.conn)
            .await?;
        Ok(ids.into_iter().collect())
    }

    pub async fn max_position(&self, playlist_id: i32) -> anyhow::Result<Option<i32>> {
        let max: Option<Option<i32>> = Videos::find()
            .select_only()
            .column_as(videos::Column::Position.max(), "max_position")
            .filter(videos::Column::PlaylistId.eq(playlist_id))
            .into_tuple()
            .one(&self.conn)
            .await?;
        Ok(max.flatten())
    }

    /// Video counts per playlist, one grouped query for the list endpoint.
    pub async fn counts_by_playlist(&self) -> anyhow::Result<HashMap<i32, i64>> {
        let rows: Vec<(i32, i64)> = Videos::find()
            .select_only()
            .column(videos::Column::PlaylistId)
            .column_as(videos::Column::Id.count(), "video_count")
            .group_by(videos::Column::PlaylistId)
            .into_tuple()
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().collect())
    }
}
