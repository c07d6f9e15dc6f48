use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    dataset::Dataset,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        movies = %config.movies_path.display(),
        ratings = %config.ratings_path.display(),
        genre_bonus = ?config.genre_bonus,
        "Loading dataset"
    );

    // Load the snapshot and build the read-only catalog
    let dataset = Dataset::load(&config.movies_path, &config.ratings_path)
        .context("Failed to load dataset")?;
    let catalog = Arc::new(Catalog::from(dataset));

    let state = AppState::from_catalog(catalog, &config);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}
