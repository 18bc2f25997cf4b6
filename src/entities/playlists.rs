use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "playlists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Identifier assigned by YouTube, distinct from our primary key.
    #[sea_orm(unique)]
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    /// URL-safe identifier derived from the title. Immutable after creation.
    #[sea_orm(unique)]
    pub slug: String,
    pub auto_sync: bool,
    pub last_synced_at: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::videos::Entity")]
    Videos,
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Videos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
