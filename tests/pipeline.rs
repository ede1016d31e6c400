// End-to-end pipeline tests against local fakes of the image host and the video webhook.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};
use base64::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use narrated_video::models::{SelectedImage, UiState};
use narrated_video::{handlers, AppConfig, AppState, GenerationError};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

struct Upstream {
    upload_reply: Value,
    webhook_status: StatusCode,
    webhook_reply: Value,
    gate: Option<Arc<Notify>>,
    uploads: Mutex<Vec<(HashMap<String, String>, HashMap<String, String>)>>,
    webhook_bodies: Mutex<Vec<Value>>,
}

impl Upstream {
    fn new(upload_reply: Value, webhook_status: StatusCode, webhook_reply: Value) -> Self {
        Self {
            upload_reply,
            webhook_status,
            webhook_reply,
            gate: None,
            uploads: Mutex::new(Vec::new()),
            webhook_bodies: Mutex::new(Vec::new()),
        }
    }

    fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    fn webhook_count(&self) -> usize {
        self.webhook_bodies.lock().unwrap().len()
    }
}

async fn fake_upload(
    State(upstream): State<Arc<Upstream>>,
    Query(query): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    upstream.uploads.lock().unwrap().push((query, form));
    Json(upstream.upload_reply.clone())
}

async fn fake_webhook(
    State(upstream): State<Arc<Upstream>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.webhook_bodies.lock().unwrap().push(body);
    if let Some(gate) = &upstream.gate {
        gate.notified().await;
    }
    (upstream.webhook_status, Json(upstream.webhook_reply.clone()))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start_upstream(upstream: Upstream) -> (Arc<Upstream>, AppConfig) {
    let upstream = Arc::new(upstream);
    let app = Router::new()
        .route("/1/upload", post(fake_upload))
        .route("/webhook/generate-video", post(fake_webhook))
        .with_state(upstream.clone());
    let base_url = serve(app).await;

    let config = AppConfig {
        imgbb_upload_url: format!("{}/1/upload", base_url),
        imgbb_api_key: "test-key".to_string(),
        video_webhook_url: format!("{}/webhook/generate-video", base_url),
        http_timeout: Duration::from_secs(10),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    (upstream, config)
}

fn hosted_ok() -> Value {
    json!({ "success": true, "status": 200, "data": { "url": "https://img.example/abc.jpg" } })
}

async fn ready_state(config: AppConfig) -> AppState {
    let state = AppState::from_config(config).unwrap();
    let image = SelectedImage::new(JPEG_BYTES.to_vec(), "image/jpeg", Some("photo.jpg".into())).unwrap();
    state.orchestrator.select_image(image).await.unwrap();
    state.orchestrator.set_narration("Hello world").await;
    state
}

#[tokio::test]
async fn test_hello_world_scenario() {
    let (upstream, config) = start_upstream(Upstream::new(
        hosted_ok(),
        StatusCode::OK,
        json!({ "video_url": "https://cdn.example/out.mp4" }),
    ))
    .await;
    let state = ready_state(config).await;

    let result = state.orchestrator.generate().await.unwrap();

    assert_eq!(result.video_url, "https://cdn.example/out.mp4");
    assert_eq!(
        state.orchestrator.state().await,
        UiState::Ready { video_url: "https://cdn.example/out.mp4".into() }
    );

    let uploads = upstream.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    let (query, form) = &uploads[0];
    assert_eq!(query.get("key").map(String::as_str), Some("test-key"));
    let image_field = form.get("image").unwrap();
    assert!(!image_field.starts_with("data:"));
    assert_eq!(image_field, &BASE64_STANDARD.encode(JPEG_BYTES));

    let bodies = upstream.webhook_bodies.lock().unwrap();
    assert_eq!(
        bodies[0],
        json!({
            "script": { "type": "text", "input": "Hello world" },
            "source_url": "https://img.example/abc.jpg",
            "config": { "stitch": "true" }
        })
    );
}

#[tokio::test]
async fn test_rejected_upload_never_reaches_webhook() {
    let (upstream, config) = start_upstream(Upstream::new(
        json!({ "success": false, "status": 400, "error": { "message": "Invalid API v1 key." } }),
        StatusCode::OK,
        json!({ "video_url": "https://cdn.example/out.mp4" }),
    ))
    .await;
    let state = ready_state(config).await;

    let err = state.orchestrator.generate().await.unwrap_err();

    assert!(matches!(err, GenerationError::Upload(_)));
    assert_eq!(upstream.upload_count(), 1);
    assert_eq!(upstream.webhook_count(), 0);
    assert!(matches!(state.orchestrator.state().await, UiState::Failed { .. }));
}

#[tokio::test]
async fn test_unreachable_image_host_is_network_error() {
    let config = AppConfig {
        // Port 9 (discard) on loopback is expected to refuse connections.
        imgbb_upload_url: "http://127.0.0.1:9/1/upload".to_string(),
        imgbb_api_key: "test-key".to_string(),
        video_webhook_url: "http://127.0.0.1:9/webhook".to_string(),
        http_timeout: Duration::from_secs(5),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    let state = ready_state(config).await;

    let err = state.orchestrator.generate().await.unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}

#[tokio::test]
async fn test_download_url_fallback() {
    let (_upstream, config) = start_upstream(Upstream::new(
        hosted_ok(),
        StatusCode::OK,
        json!({ "download_url": "https://x/video.mp4" }),
    ))
    .await;
    let state = ready_state(config).await;

    let result = state.orchestrator.generate().await.unwrap();
    assert_eq!(result.video_url, "https://x/video.mp4");
}

#[tokio::test]
async fn test_missing_url_fields_is_response_shape_error() {
    let (upstream, config) = start_upstream(Upstream::new(
        hosted_ok(),
        StatusCode::OK,
        json!({ "message": "Workflow was started" }),
    ))
    .await;
    let state = ready_state(config).await;

    let err = state.orchestrator.generate().await.unwrap_err();

    assert!(matches!(err, GenerationError::ResponseShape(_)));
    assert_eq!(upstream.webhook_count(), 1);
    assert_eq!(state.orchestrator.state().await.video_url(), None);
}

#[tokio::test]
async fn test_webhook_error_status_is_network_error() {
    let (_upstream, config) = start_upstream(Upstream::new(
        hosted_ok(),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "video_url": "https://cdn.example/out.mp4" }),
    ))
    .await;
    let state = ready_state(config).await;

    let err = state.orchestrator.generate().await.unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}

#[tokio::test]
async fn test_regenerate_repeats_both_calls() {
    let (upstream, config) = start_upstream(Upstream::new(
        hosted_ok(),
        StatusCode::OK,
        json!({ "video_url": "https://cdn.example/out.mp4" }),
    ))
    .await;
    let state = ready_state(config).await;

    state.orchestrator.generate().await.unwrap();
    state.orchestrator.generate().await.unwrap();

    assert_eq!(upstream.upload_count(), 2);
    assert_eq!(upstream.webhook_count(), 2);
}

#[tokio::test]
async fn test_http_generate_without_input_is_bad_request() {
    let (upstream, config) = start_upstream(Upstream::new(
        hosted_ok(),
        StatusCode::OK,
        json!({ "video_url": "https://cdn.example/out.mp4" }),
    ))
    .await;
    let state = Arc::new(AppState::from_config(config).unwrap());
    let base_url = serve(handlers::app_router(state)).await;
    let client = reqwest::Client::new();

    let response = client.post(format!("{}/api/generate", base_url)).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notification"]["title"], "Missing Information");

    assert_eq!(upstream.upload_count(), 0);
    assert_eq!(upstream.webhook_count(), 0);
}

#[tokio::test]
async fn test_http_generate_conflicts_while_submitting() {
    let gate = Arc::new(Notify::new());
    let mut upstream = Upstream::new(
        hosted_ok(),
        StatusCode::OK,
        json!({ "video_url": "https://cdn.example/out.mp4" }),
    );
    upstream.gate = Some(gate.clone());
    let (upstream, config) = start_upstream(upstream).await;

    let state = Arc::new(ready_state(config).await);
    let base_url = serve(handlers::app_router(state.clone())).await;
    let client = reqwest::Client::new();

    let first = {
        let client = client.clone();
        let url = format!("{}/api/generate", base_url);
        tokio::spawn(async move { client.post(url).send().await.unwrap() })
    };

    for _ in 0..200 {
        if state.orchestrator.state().await.is_submitting() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(state.orchestrator.state().await.is_submitting());

    let second = client.post(format!("{}/api/generate", base_url)).send().await.unwrap();
    assert_eq!(second.status(), reqwest::StatusCode::CONFLICT);

    gate.notify_one();
    let first = first.await.unwrap();
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["video_url"], "https://cdn.example/out.mp4");

    assert_eq!(upstream.upload_count(), 1);

    let snapshot: Value = client
        .get(format!("{}/api/state", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["state"]["status"], "ready");
    assert_eq!(snapshot["narration"], "Hello world");
    assert_eq!(snapshot["image"]["mime_type"], "image/jpeg");
}
