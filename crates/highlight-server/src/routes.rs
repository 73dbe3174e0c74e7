use std::{path::PathBuf, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use highlight_config::DescriptorConfig;
use http::StatusCode;
use serde::Serialize;

use crate::{
    error::{PipelineError, detail_response},
    pipeline::{Alignment, Pipeline},
    request::{ExtractPayload, SynthesizeRequest},
};

/// Static part of the `GET /` document
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    service: String,
    status: &'static str,
    version: &'static str,
    description: String,
    documentation_url: String,
    #[serde(skip_serializing_if = "Contact::is_empty")]
    developer_contact: Contact,
}

#[derive(Debug, Clone, Serialize)]
struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl Contact {
    const fn is_empty(&self) -> bool {
        self.email.is_none() && self.url.is_none()
    }
}

impl From<&DescriptorConfig> for ServiceDescriptor {
    fn from(config: &DescriptorConfig) -> Self {
        Self {
            service: config.name.clone(),
            status: "running",
            version: env!("CARGO_PKG_VERSION"),
            description: config.description.clone(),
            documentation_url: config.documentation_url.clone(),
            developer_contact: Contact {
                email: config.contact_email.clone(),
                url: config.contact_url.clone(),
            },
        }
    }
}

#[derive(Serialize)]
struct DescriptorResponse<'a> {
    #[serde(flatten)]
    descriptor: &'a ServiceDescriptor,
    server_time: String,
}

/// HTML page served at `/ui/`
#[derive(Debug, Clone)]
pub struct UiPage {
    pub path: PathBuf,
}

pub fn descriptor_router(descriptor: ServiceDescriptor) -> Router {
    Router::new()
        .route("/", get(describe))
        .with_state(Arc::new(descriptor))
}

pub fn ui_router(page: UiPage) -> Router {
    Router::new().route("/ui/", get(ui)).with_state(Arc::new(page))
}

pub fn synthesize_router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/synthesize", post(synthesize))
        .with_state(pipeline)
}

async fn describe(State(descriptor): State<Arc<ServiceDescriptor>>) -> Response {
    let server_time = jiff::Timestamp::now().to_string();

    Json(DescriptorResponse {
        descriptor: &descriptor,
        server_time,
    })
    .into_response()
}

async fn ui(State(page): State<Arc<UiPage>>) -> Response {
    match tokio::fs::read_to_string(&page.path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %page.path.display(), "ui page is missing");
            detail_response(StatusCode::NOT_FOUND, "Not Found")
        }
        Err(e) => {
            tracing::error!(path = %page.path.display(), "failed to read ui page: {e}");
            detail_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

#[tracing::instrument(skip_all, fields(chars = request.text.chars().count()))]
async fn synthesize(
    State(pipeline): State<Arc<Pipeline>>,
    ExtractPayload(request): ExtractPayload<SynthesizeRequest>,
) -> Result<Json<Alignment>, PipelineError> {
    tracing::debug!("synthesize handler called");

    let alignment = pipeline.run(request.text).await?;

    Ok(Json(alignment))
}
