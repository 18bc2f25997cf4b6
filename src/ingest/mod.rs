//! Playlist ingestion pipeline: URL parsing, duration decoding, slug
//! derivation and the remote playlist fetcher.

pub mod duration;
pub mod fetcher;
pub mod slug;
pub mod url;

pub use fetcher::{FetchError, FetchedPlaylist, FetchedVideo, PlaylistSource, YouTubeFetcher};
