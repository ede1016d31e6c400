// src/config.rs
use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Runtime configuration, read from the process environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub imgbb_upload_url: String,
    pub imgbb_api_key: String,
    pub video_webhook_url: String,
    pub http_timeout: Duration,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let imgbb_api_key = get("IMGBB_API_KEY").ok_or(ConfigError::MissingVar("IMGBB_API_KEY"))?;
        let video_webhook_url =
            get("VIDEO_WEBHOOK_URL").ok_or(ConfigError::MissingVar("VIDEO_WEBHOOK_URL"))?;
        let imgbb_upload_url =
            get("IMGBB_UPLOAD_URL").unwrap_or_else(|| DEFAULT_IMGBB_UPLOAD_URL.to_string());
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                    name: "HTTP_TIMEOUT_SECS",
                    reason: format!("{}", e),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        name: "HTTP_TIMEOUT_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        for (name, url) in [
            ("IMGBB_UPLOAD_URL", &imgbb_upload_url),
            ("VIDEO_WEBHOOK_URL", &video_webhook_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: format!("'{}' is not a valid URL", url),
                });
            }
        }

        Ok(Self {
            imgbb_upload_url,
            imgbb_api_key,
            video_webhook_url,
            http_timeout,
            bind_addr,
        })
    }
}
