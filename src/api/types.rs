use serde::Serialize;

use crate::models::course::{Course, Playlist, Video};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoDto {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub url: String,
    #[serde(rename = "youtubeId")]
    pub youtube_id: String,
    pub provider: String,
    pub duration: i64,
    pub position: i32,
}

impl From<Video> for VideoDto {
    fn from(video: Video) -> Self {
        Self {
            title: video.title,
            description: video.description,
            thumbnail: video.thumbnail,
            url: video.url,
            youtube_id: video.youtube_id,
            provider: video.provider,
            duration: video.duration,
            position: video.position,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub slug: String,
    pub auto_sync: bool,
    pub last_synced_at: Option<String>,
    pub videos: Vec<VideoDto>,
}

impl From<Course> for CourseDto {
    fn from(course: Course) -> Self {
        Self {
            id: course.playlist.id,
            title: course.playlist.title,
            description: course.playlist.description,
            thumbnail: course.playlist.thumbnail,
            slug: course.playlist.slug,
            auto_sync: course.playlist.auto_sync,
            last_synced_at: course.playlist.last_synced_at,
            videos: course.videos.into_iter().map(VideoDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaylistSummaryDto {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub video_count: i64,
    pub auto_sync: bool,
    pub last_synced_at: Option<String>,
}

impl PlaylistSummaryDto {
    #[must_use]
    pub fn from_playlist(playlist: Playlist, video_count: i64) -> Self {
        Self {
            id: playlist.id,
            slug: playlist.slug,
            title: playlist.title,
            thumbnail: playlist.thumbnail,
            video_count,
            auto_sync: playlist.auto_sync,
            last_synced_at: playlist.last_synced_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncResultDto {
    pub added: u64,
}
