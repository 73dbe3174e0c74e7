#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cors;
mod error;
mod health;
mod pipeline;
mod request;
mod routes;

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use highlight_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::PipelineError;
pub use pipeline::{Alignment, Pipeline};
use routes::{ServiceDescriptor, UiPage};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    in_flight: CancellationToken,
}

impl Server {
    /// Build the server from configuration
    pub async fn new(config: &Config) -> Self {
        let in_flight = CancellationToken::new();
        let pipeline = Pipeline::from_config(config, in_flight.clone()).await;

        Self::with_pipeline(config, pipeline, in_flight)
    }

    /// Build the server around an existing pipeline
    ///
    /// `in_flight` is cancelled when [`Server::serve`] starts shutting down.
    pub fn with_pipeline(config: &Config, pipeline: Pipeline, in_flight: CancellationToken) -> Self {
        let server = &config.server;

        tracing::info!(
            folder = %config.cloud.folder_id,
            bucket = %config.storage.bucket,
            language = %config.stt.language,
            "pipeline configured"
        );

        let mut app = Router::new()
            .merge(routes::descriptor_router(ServiceDescriptor::from(&server.descriptor)))
            .merge(routes::ui_router(UiPage {
                path: server.static_dir.join("index.html"),
            }))
            .merge(routes::synthesize_router(Arc::new(pipeline)))
            .nest_service("/static", ServeDir::new(&server.static_dir));

        // Health check
        if server.health.enabled {
            app = app.route(&server.health.path, axum::routing::get(health::health_handler));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address: server.listen_address,
            in_flight,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. Recognition polls
    /// still in flight are cancelled at that point and answer with a 500.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        let in_flight = self.in_flight;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
                in_flight.cancel();
            })
            .await?;

        Ok(())
    }
}
