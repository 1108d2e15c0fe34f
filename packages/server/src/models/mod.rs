pub mod auth;
pub mod client;
pub mod shared;
pub mod video;
