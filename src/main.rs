// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use series_dashboard::application::catalog_service::CatalogService;
use series_dashboard::application::share_codec::ShareStateCodec;
use series_dashboard::infrastructure::analysis_client::AnalysisClient;
use series_dashboard::infrastructure::config::load_dashboard_config;
use series_dashboard::infrastructure::directory_repository::DirectorySeriesRepository;
use series_dashboard::presentation::app_state::AppState;
use series_dashboard::presentation::handlers::{
    filter_catalog, get_selection, health_check, resolve_share, upload,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_dashboard_config()?;
    let layout = config.resources.layout();

    // Catalogs are read once; files added later show up in /get_selection only
    let repository = Arc::new(DirectorySeriesRepository::new(
        config.resources.dir.clone(),
        config.resources.suffix.clone(),
    ));
    let catalog_service = CatalogService::new(repository, layout.clone(), config.catalog.clone());
    let catalogs = catalog_service.load_catalogs().await?;

    let analysis = Arc::new(AnalysisClient::new(&config.analysis));
    tracing::info!("Uploads are relayed to {}", analysis.endpoint());

    let state = Arc::new(AppState {
        catalog_service,
        catalogs,
        codec: ShareStateCodec::new(layout),
        analysis,
    });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/get_selection", get(get_selection))
        .route("/catalog", get(filter_catalog))
        .route("/share/resolve", get(resolve_share))
        .route("/upload", post(upload))
        .nest_service(
            &config.resources.mount_path(),
            ServeDir::new(&config.resources.dir),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting series-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
