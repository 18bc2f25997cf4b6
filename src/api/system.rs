use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct SystemStatusDto {
    pub version: String,
    pub uptime_seconds: u64,
    pub database: String,
}

pub async fn status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatusDto>>, ApiError> {
    let database = match state.shared.store.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {e}"),
    };

    Ok(Json(ApiResponse::success(SystemStatusDto {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    })))
}
