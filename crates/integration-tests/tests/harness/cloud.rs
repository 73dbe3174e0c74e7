//! Mock cloud for integration tests
//!
//! Serves the IAM, synthesis, recognition and operation APIs on one port and
//! a path-style object store on another, recording what it was asked to do.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing,
};
use jwt_compact::{AlgorithmExt, UntrustedToken, alg::Rsa};
use rsa::{RsaPrivateKey, RsaPublicKey, pkcs8::DecodePrivateKey};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Private half of the service account used by the tests
pub const SERVICE_ACCOUNT_PEM: &str = include_str!("../../../iam/tests/fixtures/sa_test_key.pem");

pub const KEY_ID: &str = "ajekeyid";
pub const SERVICE_ACCOUNT_ID: &str = "ajesaid";
pub const ISSUED_TOKEN: &str = "t1.mock-iam-token";
pub const OPERATION_ID: &str = "e03sup6d5h1qr";

/// Stage the mock cloud should fail at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    TokenExchange,
    Synthesis,
    Upload,
    Recognize,
    /// Finish the operation without a response payload
    Operation,
}

/// Counters for every mocked endpoint
#[derive(Debug, Default)]
pub struct Calls {
    pub token: AtomicU32,
    pub synthesize: AtomicU32,
    pub upload: AtomicU32,
    pub recognize: AtomicU32,
    pub operation: AtomicU32,
}

#[derive(Debug, Default)]
struct Recorded {
    synthesized_text: Option<String>,
    uploaded: Vec<(String, usize)>,
    recognized_uri: Option<String>,
}

struct CloudState {
    fault: Fault,
    pending_polls: u32,
    public_key: RsaPublicKey,
    token_url: String,
    calls: Calls,
    recorded: Mutex<Recorded>,
}

/// Running mock cloud
pub struct MockCloud {
    api: SocketAddr,
    storage: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<CloudState>,
}

impl MockCloud {
    /// Start a healthy mock cloud that reports two pending polls before finishing
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Fault::None, 2).await
    }

    pub async fn start_with(fault: Fault, pending_polls: u32) -> anyhow::Result<Self> {
        let public_key = RsaPublicKey::from(&RsaPrivateKey::from_pkcs8_pem(SERVICE_ACCOUNT_PEM)?);

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let storage_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let api = api_listener.local_addr()?;
        let storage = storage_listener.local_addr()?;

        let state = Arc::new(CloudState {
            fault,
            pending_polls,
            public_key,
            token_url: format!("http://{api}/iam/v1/tokens"),
            calls: Calls::default(),
            recorded: Mutex::new(Recorded::default()),
        });

        let api_app = Router::new()
            .route("/iam/v1/tokens", routing::post(handle_token))
            .route("/speech/v1/tts:synthesize", routing::post(handle_synthesize))
            .route("/speech/stt/v2/longRunningRecognize", routing::post(handle_recognize))
            .route("/operations/{id}", routing::get(handle_operation))
            .with_state(Arc::clone(&state));

        let storage_app = Router::new()
            .route("/{bucket}/{*key}", routing::put(handle_put_object))
            .with_state(Arc::clone(&state));

        let shutdown = CancellationToken::new();

        for (listener, app) in [(api_listener, api_app), (storage_listener, storage_app)] {
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        shutdown.cancelled().await;
                    })
                    .await
                    .ok();
            });
        }

        Ok(Self {
            api,
            storage,
            shutdown,
            state,
        })
    }

    /// Base URL of the IAM, synthesis and recognition APIs
    pub fn api_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.api)
    }

    /// Endpoint of the object store
    pub fn storage_url(&self) -> String {
        format!("http://{}", self.storage)
    }

    pub fn calls(&self) -> &Calls {
        &self.state.calls
    }

    /// Per-endpoint call counts: token, synthesize, upload, recognize, operation
    pub fn counts(&self) -> [u32; 5] {
        let calls = &self.state.calls;
        [
            calls.token.load(Ordering::SeqCst),
            calls.synthesize.load(Ordering::SeqCst),
            calls.upload.load(Ordering::SeqCst),
            calls.recognize.load(Ordering::SeqCst),
            calls.operation.load(Ordering::SeqCst),
        ]
    }

    pub fn synthesized_text(&self) -> Option<String> {
        self.recorded().synthesized_text.clone()
    }

    /// Object keys and sizes received by the object store
    pub fn uploaded(&self) -> Vec<(String, usize)> {
        self.recorded().uploaded.clone()
    }

    pub fn recognized_uri(&self) -> Option<String> {
        self.recorded().recognized_uri.clone()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.state.recorded.lock().unwrap()
    }
}

impl Drop for MockCloud {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {ISSUED_TOKEN}"))
}

#[derive(Deserialize)]
struct TokenRequest {
    jwt: String,
}

async fn handle_token(State(state): State<Arc<CloudState>>, Json(request): Json<TokenRequest>) -> Response {
    state.calls.token.fetch_add(1, Ordering::SeqCst);

    if state.fault == Fault::TokenExchange {
        return (StatusCode::UNAUTHORIZED, "invalid service account key").into_response();
    }

    let Ok(untrusted) = UntrustedToken::new(&request.jwt) else {
        return (StatusCode::BAD_REQUEST, "malformed jwt").into_response();
    };

    if untrusted.header().key_id.as_deref() != Some(KEY_ID) {
        return (StatusCode::UNAUTHORIZED, "unknown key id").into_response();
    }

    let Ok(token) = Rsa::ps256()
        .validator::<serde_json::Value>(&state.public_key)
        .validate(&untrusted)
    else {
        return (StatusCode::UNAUTHORIZED, "bad signature").into_response();
    };

    let claims = &token.claims().custom;
    if claims["iss"] != SERVICE_ACCOUNT_ID || claims["aud"] != state.token_url.as_str() {
        return (StatusCode::UNAUTHORIZED, "wrong issuer or audience").into_response();
    }

    Json(json!({
        "iamToken": ISSUED_TOKEN,
        "expiresAt": "2030-01-01T00:00:00Z"
    }))
    .into_response()
}

async fn handle_synthesize(
    State(state): State<Arc<CloudState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.calls.synthesize.fetch_add(1, Ordering::SeqCst);

    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if state.fault == Fault::Synthesis {
        return (StatusCode::INTERNAL_SERVER_ERROR, "synthesizer unavailable").into_response();
    }

    let expected = [
        ("lang", "ru-RU"),
        ("voice", "marina"),
        ("emotion", "friendly"),
        ("speed", "1.2"),
        ("folderId", "b1gtestfolder"),
        ("format", "oggopus"),
    ];
    if expected
        .iter()
        .any(|(field, value)| form.get(*field).map(String::as_str) != Some(*value))
    {
        return (StatusCode::BAD_REQUEST, "unexpected voice parameters").into_response();
    }

    state.recorded.lock().unwrap().synthesized_text = form.get("text").cloned();

    ([("content-type", "audio/ogg")], b"OggS\x00\x02mock-opus-stream".to_vec()).into_response()
}

async fn handle_put_object(
    State(state): State<Arc<CloudState>>,
    Path((bucket, key)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    state.calls.upload.fetch_add(1, Ordering::SeqCst);

    if state.fault == Fault::Upload {
        return (
            StatusCode::FORBIDDEN,
            [("content-type", "application/xml")],
            "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>",
        )
            .into_response();
    }

    if bucket != "speech" {
        return StatusCode::NOT_FOUND.into_response();
    }

    state.recorded.lock().unwrap().uploaded.push((key, body.len()));

    (StatusCode::OK, [("etag", "\"9b2cf535f27731c974343645a3985328\"")]).into_response()
}

async fn handle_recognize(
    State(state): State<Arc<CloudState>>,
    headers: HeaderMap,
    Json(request): Json<serde_json::Value>,
) -> Response {
    state.calls.recognize.fetch_add(1, Ordering::SeqCst);

    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if state.fault == Fault::Recognize {
        return (StatusCode::BAD_REQUEST, "audio uri is not reachable").into_response();
    }

    if request["config"]["specification"]["languageCode"] != "ru-RU" {
        return (StatusCode::BAD_REQUEST, "unexpected language").into_response();
    }

    if request["config"]["specification"]["audioEncoding"] != "OGG_OPUS" {
        return (StatusCode::BAD_REQUEST, "audio encoding does not match the synthesized format").into_response();
    }

    state.recorded.lock().unwrap().recognized_uri = request["audio"]["uri"].as_str().map(str::to_string);

    Json(json!({ "id": OPERATION_ID, "done": false })).into_response()
}

async fn handle_operation(
    State(state): State<Arc<CloudState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let query = state.calls.operation.fetch_add(1, Ordering::SeqCst) + 1;

    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if id != OPERATION_ID {
        return (StatusCode::NOT_FOUND, "operation not found").into_response();
    }

    if query <= state.pending_polls {
        return Json(json!({ "id": id, "done": false })).into_response();
    }

    if state.fault == Fault::Operation {
        return Json(json!({
            "id": id,
            "done": true,
            "error": { "code": 3, "message": "audio could not be decoded" }
        }))
        .into_response();
    }

    Json(json!({
        "id": id,
        "done": true,
        "response": {
            "@type": "type.googleapis.com/yandex.cloud.ai.stt.v2.LongRunningRecognitionResponse",
            "chunks": [{
                "alternatives": [{
                    "words": [{
                        "startTime": "0.120s",
                        "endTime": "0.879999999s",
                        "word": "привет",
                        "confidence": 1
                    }],
                    "text": "привет",
                    "confidence": 1
                }],
                "channelTag": "1"
            }]
        }
    }))
    .into_response()
}
