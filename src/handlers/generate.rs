// src/handlers/generate.rs
//! Session endpoints: pick an image, set narration, run the generator, poll state.

use axum::{
    extract::{multipart::Multipart, DefaultBodyLimit, Extension},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::GenerationError;
use crate::models::{Notification, SelectedImage};
use crate::AppState;

#[derive(Deserialize)]
pub struct NarrationRequest {
    pub text: String,
}

pub fn generate_routes() -> Router {
    Router::new()
        .route("/api/image", post(select_image).delete(clear_image))
        .route("/api/narration", put(set_narration))
        .route("/api/generate", post(generate_video))
        .route("/api/state", get(get_state))
        // Image size is not limited here.
        .layer(DefaultBodyLimit::disable())
}

/// POST /api/image - multipart field `image`
pub async fn select_image(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Malformed multipart body: {}", e);
                return bad_request(format!("Malformed multipart body: {}", e));
            }
        };

        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return bad_request(format!("Failed to read image: {}", e)),
        };

        let image = match SelectedImage::new(bytes.to_vec(), mime_type, file_name) {
            Ok(image) => image,
            Err(e) => return bad_request(e.to_string()),
        };

        let summary = json!({
            "mime_type": image.mime_type,
            "file_name": image.file_name,
            "size_bytes": image.size_bytes(),
        });

        if let Err(e) = state.orchestrator.select_image(image).await {
            return bad_request(e.to_string());
        }

        tracing::info!("📁 Image selected: {}", summary);
        return (StatusCode::OK, Json(json!({ "success": true, "image": summary }))).into_response();
    }

    bad_request("Missing multipart field 'image'".to_string())
}

/// DELETE /api/image
pub async fn clear_image(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    state.orchestrator.clear_image().await;
    Json(json!({ "success": true }))
}

/// PUT /api/narration
pub async fn set_narration(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<NarrationRequest>,
) -> impl IntoResponse {
    let length = request.text.chars().count();
    state.orchestrator.set_narration(request.text).await;
    Json(json!({ "success": true, "length": length }))
}

/// POST /api/generate - runs both upstream calls before answering
pub async fn generate_video(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    // The page disables its button while submitting; this is the server-side
    // equivalent. The orchestrator itself does not serialize calls.
    if state.orchestrator.state().await.is_submitting() {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "success": false,
                "error": "in_progress",
                "message": "A video is already being generated",
            })),
        )
            .into_response();
    }

    match state.orchestrator.generate().await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "video_url": result.video_url,
                "notification": Notification::video_ready(),
            })),
        )
            .into_response(),
        Err(e) => {
            let status = status_for(&e);
            (
                status,
                Json(json!({
                    "success": false,
                    "error": e.kind(),
                    "notification": Notification::for_error(&e),
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/state
pub async fn get_state(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(state.orchestrator.snapshot().await)
}

fn status_for(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn bad_request(message: String) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": "validation", "message": message })),
    )
        .into_response()
}
