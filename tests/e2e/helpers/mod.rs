use pdf_speech::{
    controllers::{extraction::ExtractionController, tts::TtsController},
    domain::{extraction::ExtractionService, tts::TtsService},
    infrastructure::{
        config::Config,
        http::build_router,
        repositories::{DocumentRepository, LopdfDocumentRepository, TtsRepository},
    },
};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod fixtures;

use api_client::TestClient;
use fakes::{FakeDocumentRepository, FakeTtsRepository};

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::start(
                Arc::new(FakeDocumentRepository::with_pages(&["Hello", "World"])),
                Arc::new(FakeTtsRepository::new()),
            )
            .await
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Server task ends with the test runtime
        }
    }
}

#[allow(dead_code)]
impl TestContext {
    /// Serve the app with the given capabilities on an ephemeral port
    pub async fn start(
        document_repo: Arc<dyn DocumentRepository>,
        tts_repo: Arc<dyn TtsRepository>,
    ) -> Self {
        Self::start_with_config(test_config(), document_repo, tts_repo).await
    }

    /// Real lopdf parsing with a fake speech provider
    pub async fn with_real_pdf_parser() -> Self {
        Self::start(
            Arc::new(LopdfDocumentRepository::new()),
            Arc::new(FakeTtsRepository::new()),
        )
        .await
    }

    pub async fn start_with_config(
        config: Config,
        document_repo: Arc<dyn DocumentRepository>,
        tts_repo: Arc<dyn TtsRepository>,
    ) -> Self {
        let extraction_controller = Arc::new(ExtractionController::new(Arc::new(
            ExtractionService::new(document_repo),
        )));
        let tts_controller = Arc::new(TtsController::new(Arc::new(TtsService::new(tts_repo))));
        let app = build_router(&config, extraction_controller, tts_controller);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: TestClient::new(&base_url),
            config,
        }
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Assigned by the OS
        ..Config::default()
    }
}
