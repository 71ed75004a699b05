use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use freewatch_api::{
    catalog::Catalog,
    config::Config,
    routes::{cors_layer, create_router, AppState},
    services::LetterboxdProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("freewatch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Loaded once, shared read-only by every request
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_path))?;

    let provider = LetterboxdProvider::new(
        config.letterboxd_url.clone(),
        config.profile_timeout(),
        config.profile_max_retries,
        config.profile_max_pages,
    )
    .context("Failed to build Letterboxd client")?;

    let state = Arc::new(AppState::new(Arc::new(catalog), Arc::new(provider)));
    let app = create_router(state).layer(cors_layer(config.cors_allowed_origin.as_deref())?);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
