//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own catalog file and fakes.

use super::constants::*;
use super::fakes::{FakeClassifier, FakeVideoSearch};
use super::fixtures::create_test_catalog;
use mood2music_server::config::{AppConfig, CliConfig};
use mood2music_server::load_catalog;
use mood2music_server::pipeline::MoodPipeline;
use mood2music_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

/// Test server instance with an isolated catalog
///
/// When dropped, the server gracefully shuts down and the catalog file is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The fake model, to check whether it was consulted
    pub classifier: Arc<FakeClassifier>,

    // Private fields - keep resources alive until drop
    _catalog_file: NamedTempFile,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server whose model always answers DEFAULT_MODEL_MOOD
    pub async fn spawn() -> Self {
        Self::spawn_with_model_answer(Some(DEFAULT_MODEL_MOOD)).await
    }

    /// Spawns a server whose model answers `answer`, or fails when `None`
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be written or loaded, the port cannot be
    /// bound or the server does not become ready in time.
    pub async fn spawn_with_model_answer(answer: Option<&str>) -> Self {
        let catalog_file = create_test_catalog().expect("Failed to create test catalog");

        let cli = CliConfig {
            catalog_path: Some(catalog_file.path().to_path_buf()),
            youtube_api_key: Some("test-key".to_string()),
            video_max_results: 10,
            video_timeout_sec: 5,
            classifier_timeout_sec: 5,
            sample_size: 5,
            seed: Some(7),
            ..Default::default()
        };
        let app_config = AppConfig::resolve(&cli, None).expect("Failed to resolve config");

        let catalog = load_catalog(&app_config.catalog_path).expect("Failed to load catalog");
        let classifier = Arc::new(FakeClassifier::new(answer));
        let pipeline = MoodPipeline::with_services(
            &app_config,
            Arc::new(catalog),
            classifier.clone(),
            Arc::new(FakeVideoSearch),
        )
        .expect("Failed to build pipeline");

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            metrics_port: 0,
            requests_logging_level: RequestsLoggingLevel::None,
        };
        let app = make_app(config, Arc::new(pipeline));

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            classifier,
            _catalog_file: catalog_file,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the / endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
