pub mod playlist;
pub mod video;
