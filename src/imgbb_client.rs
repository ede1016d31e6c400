// src/imgbb_client.rs
// Image host client: turns a local image into a public URL via imgbb's upload API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::error::GenerationError;

/// Anything that can host an image and hand back a dereferenceable URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// `encoded_image` is plain base64 with no `data:` prefix.
    async fn upload(&self, encoded_image: &str, mime_type: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct ImgbbClient {
    client: Client,
    api_key: String,
    upload_url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ImgbbUploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<ImgbbImageData>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<ImgbbErrorBody>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ImgbbImageData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub delete_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ImgbbErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ImgbbUploadResponse {
    /// `data.url` when the host reports success, otherwise an `Upload` error.
    pub fn into_url(self) -> Result<String, GenerationError> {
        if !self.success {
            let detail = self
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "host returned success=false".to_string());
            return Err(GenerationError::Upload(detail));
        }

        self.data
            .and_then(|d| d.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| GenerationError::Upload("response has no data.url".to_string()))
    }
}

impl ImgbbClient {
    pub fn new(api_key: String, upload_url: String, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            upload_url,
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, encoded_image: &str, mime_type: &str) -> Result<String, GenerationError> {
        info!(
            "🖼️ Uploading image to host ({}, {} base64 chars)",
            mime_type,
            encoded_image.len()
        );

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[("image", encoded_image)])
            .send()
            .await?;

        // imgbb reports failures in the body, so the status alone decides nothing.
        let status = response.status();
        let body = response.text().await?;

        let parsed: ImgbbUploadResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Image host returned unparseable body ({}): {}", status, e);
            GenerationError::Upload(format!("unparseable response ({}): {}", status, e))
        })?;

        let url = parsed.into_url().map_err(|e| {
            error!("Image host rejected upload ({}): {}", status, e);
            e
        })?;

        info!("✅ Image hosted at {}", url);
        Ok(url)
    }
}
