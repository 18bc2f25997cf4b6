use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::youtube::YouTubeClient;
use crate::config::Config;
use crate::db::Store;
use crate::ingest::fetcher::{PlaylistSource, YouTubeFetcher};
use crate::services::{ImportService, SyncService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across all HTTP-based components for connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Coursio/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub source: Arc<dyn PlaylistSource>,

    pub import_service: Arc<ImportService>,

    pub sync_service: Arc<SyncService>,
}

impl SharedState {
    /// Production wiring: the playlist source is the real YouTube fetcher.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client =
            build_shared_http_client(config.youtube.request_timeout_seconds.into())?;

        let youtube = Arc::new(YouTubeClient::with_shared_client(
            http_client,
            config.youtube.api_key.clone(),
        ));
        let source: Arc<dyn PlaylistSource> = Arc::new(YouTubeFetcher::new(youtube));

        Self::with_source(config, source).await
    }

    /// Wiring seam for tests: substitute any [`PlaylistSource`].
    pub async fn with_source(
        config: Config,
        source: Arc<dyn PlaylistSource>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let import_service = Arc::new(ImportService::new(store.clone(), source.clone()));
        let sync_service = Arc::new(SyncService::new(store.clone(), source.clone()));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            source,
            import_service,
            sync_service,
        })
    }
}
