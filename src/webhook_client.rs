// src/webhook_client.rs
// Video generation webhook client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::GenerationError;
use crate::models::GenerationRequest;

/// Response fields that may carry the finished video, highest priority first.
/// The order mirrors what the upstream automation has been seen to return.
pub const VIDEO_URL_FIELDS: [&str; 3] = ["video_url", "download_url", "url"];

#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn submit(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    webhook_url: String,
}

impl WebhookClient {
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            webhook_url,
        })
    }
}

/// First non-empty string among [`VIDEO_URL_FIELDS`]. Non-string values are skipped.
pub fn extract_video_url(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    VIDEO_URL_FIELDS.iter().find_map(|field| {
        object
            .get(*field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

#[async_trait]
impl VideoGenerator for WebhookClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        info!(
            "🎬 Requesting video generation (source: {}, script: {} chars)",
            request.source_url,
            request.script.input.chars().count()
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!("Video webhook error ({}): {}", status, error_text);
            return Err(GenerationError::Network(format!(
                "video webhook returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!("Video webhook body is not JSON: {}", e);
            GenerationError::ResponseShape(format!("body is not JSON: {}", e))
        })?;

        match extract_video_url(&body) {
            Some(url) => {
                info!("✅ Video ready: {}", url);
                Ok(url)
            }
            None => {
                error!("Video webhook response has no video URL: {}", body);
                Err(GenerationError::ResponseShape(format!(
                    "none of {:?} present in response",
                    VIDEO_URL_FIELDS
                )))
            }
        }
    }
}
