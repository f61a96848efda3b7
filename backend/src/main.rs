use arctic_navigator::{
    AppState, config::ServerConfig, create_router, datasets::DatasetStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arctic_navigator=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        "serving datasets from {} ({} interior steps per route)",
        config.data_dir.display(),
        config.generator.interior_steps
    );

    let state = AppState::new(DatasetStore::new(&config.data_dir), config.generator);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("starting arctic-navigator on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
