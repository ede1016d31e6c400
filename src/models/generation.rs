use base64::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Image picked by the user, held in memory until replaced or cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl SelectedImage {
    /// Accepts any `image/*` MIME type. There is no size limit.
    pub fn new(
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        file_name: Option<String>,
    ) -> Result<Self, GenerationError> {
        let mime_type = mime_type.into();
        if !is_image_mime(&mime_type) {
            return Err(GenerationError::Validation(format!(
                "'{}' is not an image type",
                mime_type
            )));
        }
        if bytes.is_empty() {
            return Err(GenerationError::Validation("image file is empty".to_string()));
        }
        Ok(Self {
            bytes,
            mime_type,
            file_name,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Plain base64 of the image, without any `data:` prefix.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }

    /// `data:` URL used for the preview thumbnail.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

pub fn is_image_mime(mime_type: &str) -> bool {
    let normalized = mime_type.trim().to_ascii_lowercase();
    normalized
        .strip_prefix("image/")
        .map(|subtype| !subtype.is_empty())
        .unwrap_or(false)
}

/// Narration typed by the user. Sent as-is; only the blank check is ours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrationText(pub String);

impl NarrationText {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NarrationText {
    fn from(text: String) -> Self {
        NarrationText(text)
    }
}

// ============================================================================
// WEBHOOK REQUEST BODY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptPayload {
    #[serde(rename = "type")]
    pub script_type: String,
    pub input: String,
}

/// `stitch` travels as the string `"true"`, not a JSON boolean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    pub stitch: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            stitch: "true".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub script: ScriptPayload,
    pub source_url: String,
    pub config: GenerationConfig,
}

impl GenerationRequest {
    pub fn new(narration: &NarrationText, hosted_image_url: impl Into<String>) -> Self {
        Self {
            script: ScriptPayload {
                script_type: "text".to_string(),
                input: narration.as_str().to_string(),
            },
            source_url: hosted_image_url.into(),
            config: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    pub video_url: String,
}
