pub mod auth;
pub mod client;
pub mod media;
pub mod video;
