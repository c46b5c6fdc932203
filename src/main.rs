use pdf_speech::controllers::{extraction::ExtractionController, tts::TtsController};
use pdf_speech::domain::{extraction::ExtractionService, tts::TtsService};
use pdf_speech::infrastructure::config::{Config, LogFormat, TtsProvider};
use pdf_speech::infrastructure::http::start_http_server;
use pdf_speech::infrastructure::repositories::{
    GoogleTtsRepository, LopdfDocumentRepository, PollyTtsRepository, TtsRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PDF to Speech on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        environment = ?config.environment,
        tts_provider = ?config.tts_provider,
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (external capabilities)
    tracing::info!("Instantiating repositories...");
    let document_repo = Arc::new(LopdfDocumentRepository::new());
    let tts_repo = create_tts_repository(&config).await?;

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let extraction_service = Arc::new(ExtractionService::new(document_repo));
    let tts_service = Arc::new(TtsService::new(tts_repo));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let extraction_controller = Arc::new(ExtractionController::new(extraction_service));
    let tts_controller = Arc::new(TtsController::new(tts_service));

    // Start HTTP server with all routes
    start_http_server(config, extraction_controller, tts_controller).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    match config.tts_provider {
        TtsProvider::Google => {
            tracing::info!(tld = %config.google_tts_tld, "Using Google Translate speech endpoint");
            let client = reqwest::Client::builder().build()?;
            Ok(Arc::new(GoogleTtsRepository::new(
                client,
                &config.google_tts_tld,
            )))
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            // Check for AWS credentials in environment (for debugging)
            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            tracing::info!("AWS Polly client initialized successfully");

            Ok(Arc::new(PollyTtsRepository::new(polly_client)))
        }
    }
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "pdf_speech=debug,tower_http=debug"
    } else {
        "pdf_speech=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
