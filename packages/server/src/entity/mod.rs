pub mod admin;
pub mod trusted_client;
pub mod video;
