// src/handlers/mod.rs
pub mod generate;
pub mod ui;

use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::AppState;

/// Full application router with shared state attached.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ui::ui_routes())
        .merge(generate::generate_routes())
        .route("/api/status", get(api_status))
        .layer(axum::middleware::from_fn(crate::middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let ui_state = state.orchestrator.state().await;

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "image_host": state.config.imgbb_upload_url,
            "video_webhook": state.config.video_webhook_url,
        },
        "generator": ui_state,
    }))
}
