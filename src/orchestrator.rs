// src/orchestrator.rs
//! Generation orchestrator.
//!
//! Owns the single user session (selected image, narration, visible state) and
//! runs the pipeline: encode image -> host it -> request the video -> publish
//! the result. The two outbound calls happen strictly in that order and are
//! never retried; every `generate()` starts over from the raw image bytes.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::imgbb_client::ImageHost;
use crate::models::{
    GenerationRequest, GenerationResult, ImageSummary, NarrationText, Notification,
    SelectedImage, SessionSnapshot, UiState,
};
use crate::webhook_client::VideoGenerator;

#[derive(Debug, Default)]
struct Session {
    image: Option<SelectedImage>,
    narration: NarrationText,
    state: UiState,
    notification: Option<Notification>,
    updated_at: Option<DateTime<Utc>>,
}

impl Session {
    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

pub struct GenerationOrchestrator {
    image_host: Arc<dyn ImageHost>,
    video_generator: Arc<dyn VideoGenerator>,
    session: RwLock<Session>,
}

impl GenerationOrchestrator {
    pub fn new(image_host: Arc<dyn ImageHost>, video_generator: Arc<dyn VideoGenerator>) -> Self {
        Self {
            image_host,
            video_generator,
            session: RwLock::new(Session::default()),
        }
    }

    /// Replace the current image. Non-image MIME types are refused and the
    /// previous selection is kept.
    pub async fn select_image(&self, image: SelectedImage) -> Result<(), GenerationError> {
        // Re-validate: callers may build the struct directly.
        let image = SelectedImage::new(image.bytes, image.mime_type, image.file_name)?;
        tracing::debug!(
            mime_type = %image.mime_type,
            size_bytes = image.size_bytes(),
            "image selected"
        );
        let mut session = self.session.write().await;
        session.image = Some(image);
        session.touch();
        Ok(())
    }

    pub async fn clear_image(&self) {
        let mut session = self.session.write().await;
        session.image = None;
        session.touch();
    }

    pub async fn set_narration(&self, text: impl Into<String>) {
        let mut session = self.session.write().await;
        session.narration = NarrationText::from(text.into());
        session.touch();
    }

    pub async fn state(&self) -> UiState {
        self.session.read().await.state.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.read().await;
        SessionSnapshot {
            state: session.state.clone(),
            image: session.image.as_ref().map(|image| ImageSummary {
                mime_type: image.mime_type.clone(),
                file_name: image.file_name.clone(),
                size_bytes: image.size_bytes(),
                preview_data_url: image.data_url(),
            }),
            narration: session.narration.as_str().to_string(),
            notification: session.notification.clone(),
            updated_at: session.updated_at.unwrap_or_else(Utc::now),
        }
    }

    /// Run the whole pipeline once.
    ///
    /// Validation failures leave the state untouched and make no network call.
    /// Any later failure moves the state to `Failed` with the generic message;
    /// the detailed error is logged and returned.
    pub async fn generate(&self) -> Result<GenerationResult, GenerationError> {
        let generation_id = Uuid::new_v4();

        // The lock is released before any network await.
        let (image, narration) = {
            let mut session = self.session.write().await;
            let image = match session.image.clone() {
                Some(image) if !session.narration.is_blank() => image,
                selected => {
                    let missing = if selected.is_none() { "no image selected" } else { "narration is blank" };
                    tracing::warn!(generation_id = %generation_id, "⚠️ Generation refused: {}", missing);
                    session.notification = Some(Notification::missing_input());
                    session.touch();
                    return Err(GenerationError::Validation(missing.to_string()));
                }
            };
            session.state = UiState::Submitting;
            session.notification = None;
            session.touch();
            (image, session.narration.clone())
        };

        tracing::info!(
            generation_id = %generation_id,
            mime_type = %image.mime_type,
            size_bytes = image.size_bytes(),
            "🚀 Starting video generation"
        );

        let outcome = self.run_pipeline(&image, &narration).await;

        let mut session = self.session.write().await;
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    generation_id = %generation_id,
                    video_url = %result.video_url,
                    "✅ Video generation completed"
                );
                session.state = UiState::Ready {
                    video_url: result.video_url.clone(),
                };
                session.notification = Some(Notification::video_ready());
            }
            Err(e) => {
                tracing::error!(
                    generation_id = %generation_id,
                    kind = e.kind(),
                    error = %e,
                    "❌ Video generation failed"
                );
                session.state = UiState::Failed {
                    reason: e.user_message().to_string(),
                };
                session.notification = Some(Notification::for_error(e));
            }
        }
        session.touch();

        outcome
    }

    async fn run_pipeline(
        &self,
        image: &SelectedImage,
        narration: &NarrationText,
    ) -> Result<GenerationResult, GenerationError> {
        // Step 1: encode for form submission
        let encoded = image.to_base64();

        // Step 2: host the image; an error here skips the video call entirely
        let hosted_url = self.image_host.upload(&encoded, &image.mime_type).await?;

        // Step 3: build the webhook payload
        let request = GenerationRequest::new(narration, hosted_url);

        // Step 4: request the video
        let video_url = self.video_generator.submit(&request).await?;

        Ok(GenerationResult { video_url })
    }
}
