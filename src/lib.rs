// lib.rs - Narrated video generator: image host + video webhook orchestration
pub mod config;
pub mod error;
pub mod handlers;
pub mod imgbb_client;
pub mod middleware;
pub mod models;
pub mod orchestrator;
pub mod webhook_client;

use std::sync::Arc;

pub use config::AppConfig;
pub use error::{ConfigError, GenerationError};
pub use imgbb_client::{ImageHost, ImgbbClient};
pub use orchestrator::GenerationOrchestrator;
pub use webhook_client::{extract_video_url, VideoGenerator, WebhookClient};

// AppState holds the configuration and the single generation session
pub struct AppState {
    pub config: AppConfig,
    pub orchestrator: GenerationOrchestrator,
}

impl AppState {
    /// Wire the real imgbb and webhook clients from configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, GenerationError> {
        let image_host = ImgbbClient::new(
            config.imgbb_api_key.clone(),
            config.imgbb_upload_url.clone(),
            config.http_timeout,
        )?;
        let video_generator = WebhookClient::new(config.video_webhook_url.clone(), config.http_timeout)?;

        Ok(Self {
            orchestrator: GenerationOrchestrator::new(Arc::new(image_host), Arc::new(video_generator)),
            config,
        })
    }
}
