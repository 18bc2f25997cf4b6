use serde::Serialize;

/// An imported playlist as the rest of the application sees it.
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    pub id: i32,
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub slug: String,
    pub auto_sync: bool,
    pub last_synced_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub id: i32,
    pub playlist_id: i32,
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub url: String,
    pub provider: String,
    pub duration: i64,
    pub position: i32,
}

/// A playlist together with its ordered videos.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub playlist: Playlist,
    pub videos: Vec<Video>,
}

impl From<crate::entities::playlists::Model> for Playlist {
    fn from(model: crate::entities::playlists::Model) -> Self {
        Self {
            id: model.id,
            youtube_id: model.youtube_id,
            title: model.title,
            description: model.description,
            thumbnail: model.thumbnail,
            slug: model.slug,
            auto_sync: model.auto_sync,
            last_synced_at: model.last_synced_at,
            created_at: model.created_at,
        }
    }
}

impl From<crate::entities::videos::Model> for Video {
    fn from(model: crate::entities::videos::Model) -> Self {
        Self {
            id: model.id,
            playlist_id: model.playlist_id,
            youtube_id: model.youtube_id,
            title: model.title,
            description: model.description,
            thumbnail: model.thumbnail,
            url: model.url,
            provider: model.provider,
            duration: model.duration,
            position: model.position,
        }
    }
}
