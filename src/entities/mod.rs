pub mod playlists;
pub mod videos;

pub mod prelude {
    pub use super::playlists::Entity as Playlists;
    pub use super::videos::Entity as Videos;
}
