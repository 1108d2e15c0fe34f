use axum::{Router, routing::get};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/videos", video_routes(config))
        .nest("/clients", client_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn video_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(handlers::video::list_videos))
        .routes(routes!(
            handlers::video::get_video,
            handlers::video::update_video,
            handlers::video::delete_video
        ))
        .routes(routes!(handlers::video::create_video_link))
        .routes(routes!(handlers::video::reorder_videos))
        .routes(routes!(handlers::video::renumber_videos));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::video::upload_video))
        .layer(handlers::video::upload_body_limit(
            config.storage.max_upload_size,
        ));

    crud.merge(upload)
}

fn client_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::client::list_clients,
            handlers::client::create_client
        ))
        .routes(routes!(
            handlers::client::update_client,
            handlers::client::delete_client
        ))
        .routes(routes!(handlers::client::reorder_clients))
        .routes(routes!(handlers::client::renumber_clients))
}

/// Public media files. Kept out of the OpenAPI document: the key is a
/// catch-all path rather than a documented parameter.
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/api/v1/media/{*key}", get(handlers::media::serve_media))
}
