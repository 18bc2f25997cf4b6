use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const YOUTUBE_API: &str = "https://www.googleapis.com/youtube/v3";

/// Maximum IDs per request accepted by the YouTube Data API.
pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistResource>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistResource {
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    #[serde(rename = "default")]
    pub default_res: Option<Thumbnail>,
}

impl Thumbnails {
    /// Prefers the high-resolution variant, falling back to default-resolution.
    #[must_use]
    pub fn best_url(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.default_res.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItemResource>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemResource {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    pub content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: String,
}

/// Thin wrapper over the YouTube Data API v3.
///
/// Raw calls only; pagination, duration chunking and record mapping live in
/// the fetcher. The API key is passed as a query parameter on every call.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn with_shared_client(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, YOUTUBE_API.to_string())
    }

    /// Points the client at an alternate endpoint; tests use this to run
    /// against a local stand-in server.
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Playlist metadata by ID. `Ok(None)` means the service reported zero
    /// matching records (deleted or private playlist).
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Option<PlaylistSnippet>> {
        let url = format!(
            "{}/playlists?part=snippet&id={}&key={}",
            self.base_url,
            urlencoding::encode(playlist_id),
            self.api_key
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("YouTube API error: {} - {}", status, body));
        }

        let response: PlaylistListResponse = response.json().await?;

        Ok(response.items.into_iter().next().map(|r| r.snippet))
    }

    /// One page of playlist members; pass the previous page's continuation
    /// token to advance.
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse> {
        let mut url = format!(
            "{}/playlistItems?part=snippet&maxResults={}&playlistId={}&key={}",
            self.base_url,
            PAGE_SIZE,
            urlencoding::encode(playlist_id),
            self.api_key
        );
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(&urlencoding::encode(token));
        }

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("YouTube API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }

    /// Video metadata for a batch of at most [`PAGE_SIZE`] IDs, comma-joined
    /// into a single request.
    pub async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<VideoResource>> {
        let url = format!(
            "{}/videos?part=contentDetails&id={}&key={}",
            self.base_url,
            video_ids.join(","),
            self.api_key
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("YouTube API error: {} - {}", status, body));
        }

        let response: VideoListResponse = response.json().await?;

        Ok(response.items)
    }
}
