use crate::entities::{prelude::*, videos};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Playlists)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Videos)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Two overlapping syncs must not be able to insert the same external
        // video twice; inserts rely on ON CONFLICT against this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_videos_playlist_youtube")
                    .table(Videos)
                    .col(videos::Column::PlaylistId)
                    .col(videos::Column::YoutubeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Videos).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Playlists).to_owned())
            .await?;
        Ok(())
    }
}
