use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::ingest::fetcher::PlaylistSource;
use crate::state::SharedState;

mod error;
mod playlists;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,
}

pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

/// Test wiring: same router, any playlist source.
pub async fn create_app_state_with_source(
    config: Config,
    source: Arc<dyn PlaylistSource>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_source(config, source).await?);
    Ok(create_app_state(shared))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.shared.config.read().await;
        config.server.cors_allowed_origins.clone()
    };

    let api_router = Router::new()
        .route("/playlists/import", post(playlists::import_playlist))
        .route("/playlists", get(playlists::list_playlists))
        .route(
            "/playlists/{id}",
            get(playlists::get_playlist).delete(playlists::delete_playlist),
        )
        .route("/playlists/{id}/sync", post(playlists::sync_playlist))
        .route("/playlists/{id}/autosync", put(playlists::set_auto_sync))
        .route("/system/status", get(system::status))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
