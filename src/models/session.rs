use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GENERIC_FAILURE_MESSAGE, MISSING_INPUT_MESSAGE};

/// Visible state of the generator. Only the orchestrator moves it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Ready {
        video_url: String,
    },
    Failed {
        reason: String,
    },
}

impl UiState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, UiState::Submitting)
    }

    pub fn video_url(&self) -> Option<&str> {
        match self {
            UiState::Ready { video_url } => Some(video_url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// One-shot message for the user (the toast in the page).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn missing_input() -> Self {
        Self {
            title: "Missing Information".to_string(),
            description: MISSING_INPUT_MESSAGE.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn video_ready() -> Self {
        Self {
            title: "Video Generated!".to_string(),
            description: "Your video is ready to download.".to_string(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn failure() -> Self {
        Self {
            title: "Error".to_string(),
            description: GENERIC_FAILURE_MESSAGE.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn for_error(err: &GenerationError) -> Self {
        if err.is_validation() {
            Self::missing_input()
        } else {
            Self::failure()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSummary {
    pub mime_type: String,
    pub file_name: Option<String>,
    pub size_bytes: usize,
    pub preview_data_url: String,
}

/// Read-only view of the session handed to the surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: UiState,
    pub image: Option<ImageSummary>,
    pub narration: String,
    pub notification: Option<Notification>,
    pub updated_at: DateTime<Utc>,
}
