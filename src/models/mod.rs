// src/models/mod.rs
pub mod generation;
pub mod session;

pub use generation::{
    is_image_mime, GenerationConfig, GenerationRequest, GenerationResult, NarrationText,
    ScriptPayload, SelectedImage,
};
pub use session::{ImageSummary, Notification, NotificationVariant, SessionSnapshot, UiState};
