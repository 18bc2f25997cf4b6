//! Domain services orchestrating the ingestion pipeline against the store.

pub mod import;
pub mod sync;

pub use import::{ImportError, ImportService};
pub use sync::{SyncError, SyncService, SyncSweepStats};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::db::Store;
    use crate::ingest::fetcher::{
        FetchError, FetchedPlaylist, FetchedVideo, PROVIDER, PlaylistSource,
    };

    /// In-memory stand-in for the YouTube fetcher. Unknown playlist IDs map to
    /// `NotFound`, matching the production fetcher's contract.
    #[derive(Default)]
    pub struct StubSource {
        playlists: Mutex<HashMap<String, FetchedPlaylist>>,
    }

    impl StubSource {
        pub fn with(playlist: FetchedPlaylist) -> Self {
            let stub = Self::default();
            stub.set(playlist);
            stub
        }

        pub fn set(&self, playlist: FetchedPlaylist) {
            self.playlists
                .lock()
                .unwrap()
                .insert(playlist.youtube_id.clone(), playlist);
        }
    }

    #[async_trait::async_trait]
    impl PlaylistSource for StubSource {
        async fn fetch_playlist(&self, playlist_id: &str) -> Result<FetchedPlaylist, FetchError> {
            self.playlists
                .lock()
                .unwrap()
                .get(playlist_id)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(playlist_id.to_string()))
        }
    }

    pub fn fetched_video(youtube_id: &str, duration: i64, position: i32) -> FetchedVideo {
        FetchedVideo {
            youtube_id: youtube_id.to_string(),
            title: format!("Video {youtube_id}"),
            description: String::new(),
            thumbnail: None,
            url: format!("https://www.youtube.com/watch?v={youtube_id}"),
            provider: PROVIDER.to_string(),
            duration,
            position,
        }
    }

    pub fn fetched_playlist(
        youtube_id: &str,
        title: &str,
        videos: Vec<FetchedVideo>,
    ) -> FetchedPlaylist {
        FetchedPlaylist {
            youtube_id: youtube_id.to_string(),
            title: title.to_string(),
            description: "A test playlist".to_string(),
            thumbnail: Some("https://i.ytimg.com/vi/test/hqdefault.jpg".to_string()),
            videos,
        }
    }

    pub async fn mem_store() -> Store {
        Store::new("sqlite::memory:")
            .await
            .expect("Failed to open in-memory store")
    }
}
