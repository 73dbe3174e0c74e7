//! Test server wrapper that starts HighlightReader on a random port

use std::net::SocketAddr;

use highlight_server::Server;
use tokio_util::sync::CancellationToken;

use super::config::TestConfig;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
    config: TestConfig,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: TestConfig) -> anyhow::Result<Self> {
        let server = Server::new(&config.config).await;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self {
            addr,
            shutdown,
            client,
            config,
        })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Files left in the audio staging directory
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(self.config.staging_dir()).map_or(0, Iterator::count)
    }

    /// `POST /synthesize` with a JSON body
    pub async fn synthesize(&self, text: &str) -> reqwest::Response {
        self.client
            .post(self.url("/synthesize"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .expect("request reaches the server")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
