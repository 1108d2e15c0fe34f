use std::path::PathBuf;
use std::sync::Arc;

use common::storage::filesystem::FilesystemObjectStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    server::seed::seed_admin(&db, &config.auth).await?;
    server::seed::ensure_indexes(&db).await?;

    let store = FilesystemObjectStore::new(
        PathBuf::from(&config.storage.base_path),
        &config.storage.public_base_url,
        config.storage.max_upload_size,
    )
    .await?;
    info!("Media stored under {}", config.storage.base_path);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        config,
        store: Arc::new(store),
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
