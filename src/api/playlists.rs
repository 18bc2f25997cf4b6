use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CourseDto, PlaylistSummaryDto, SyncResultDto};
use crate::models::course::Course;

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub url: String,
}

pub async fn import_playlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ApiResponse<CourseDto>>, ApiError> {
    if payload.url.trim().is_empty() {
        return Err(ApiError::validation("Playlist URL is required"));
    }

    let course = state
        .shared
        .import_service
        .import_url(payload.url.trim())
        .await?;

    Ok(Json(ApiResponse::success(CourseDto::from(course))))
}

pub async fn list_playlists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PlaylistSummaryDto>>>, ApiError> {
    let playlists = state.shared.store.list_playlists().await?;
    let counts = state.shared.store.video_counts_by_playlist().await?;

    let dtos: Vec<PlaylistSummaryDto> = playlists
        .into_iter()
        .map(|p| {
            let count = counts.get(&p.id).copied().unwrap_or(0);
            PlaylistSummaryDto::from_playlist(p, count)
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// Looks a playlist up by numeric ID or by slug, whichever the path segment
/// parses as.
pub async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<CourseDto>>, ApiError> {
    let playlist = if let Ok(id) = key.parse::<i32>() {
        state.shared.store.get_playlist(id).await?
    } else {
        state.shared.store.get_playlist_by_slug(&key).await?
    }
    .ok_or_else(|| ApiError::not_found("Playlist", &key))?;

    let videos = state.shared.store.videos_for_playlist(playlist.id).await?;

    Ok(Json(ApiResponse::success(CourseDto::from(Course {
        playlist,
        videos,
    }))))
}

pub async fn sync_playlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SyncResultDto>>, ApiError> {
    let added = state.shared.sync_service.sync_playlist(id).await?;
    Ok(Json(ApiResponse::success(SyncResultDto { added })))
}

#[derive(Debug, Deserialize)]
pub struct AutoSyncRequest {
    pub enabled: bool,
}

pub async fn set_auto_sync(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<AutoSyncRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    state
        .shared
        .sync_service
        .set_auto_sync(id, payload.enabled)
        .await?;
    Ok(Json(ApiResponse::success(payload.enabled)))
}

pub async fn delete_playlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let removed = state.shared.store.remove_playlist(id).await?;
    if removed {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Playlist", id))
    }
}
