pub mod form;
pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    extraction::ExtractionController, health, page, tts::TtsController,
};
use crate::infrastructure::config::Config;

pub use form::{FormFields, UploadForm};
pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    extraction_controller: Arc<ExtractionController>,
    tts_controller: Arc<TtsController>,
) -> Router {
    let upload_routes = Router::new()
        .route("/upload", post(ExtractionController::upload))
        .with_state(extraction_controller);

    let tts_routes = Router::new()
        .route("/synthesize", post(TtsController::synthesize))
        .with_state(tts_controller);

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health::health))
        .merge(upload_routes)
        .merge(tts_routes)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    extraction_controller: Arc<ExtractionController>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(&config, extraction_controller, tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
