//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the backend base URL.
pub const BACKEND_URL_ENV: &str = "RESUME_SCREENER_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub upload: UploadConfig,
    pub chat: ChatConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Advisory only: larger files are logged, not rejected.
    pub max_file_size_mb: u64,
    pub allowed_mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
    /// Send chat messages to the backend `/chat` endpoint instead of
    /// answering locally.
    pub use_backend: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: DEFAULT_BACKEND_URL.to_string(),
            },
            upload: UploadConfig {
                max_file_size_mb: 10,
                allowed_mime_type: PDF_MIME_TYPE.to_string(),
            },
            chat: ChatConfig {
                reply_delay_ms: 1000,
                use_backend: false,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the config file (creating it with defaults if missing) and apply
    /// the environment override for the backend URL.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            config
        };

        config.backend.base_url = resolve_base_url(
            std::env::var(BACKEND_URL_ENV).ok(),
            &config.backend.base_url,
        );
        debug!("Backend base URL resolved to {}", config.backend.base_url);

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.upload.max_file_size_mb * 1024 * 1024
    }
}

/// Pick the backend base URL: a non-empty override wins over the configured
/// value, which falls back to the localhost default. Trailing slashes are
/// dropped so endpoint paths can be appended directly.
pub fn resolve_base_url(env_override: Option<String>, configured: &str) -> String {
    let chosen = env_override
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.trim().to_string());

    let chosen = if chosen.is_empty() {
        DEFAULT_BACKEND_URL.to_string()
    } else {
        chosen
    };

    chosen.trim_end_matches('/').to_string()
}
