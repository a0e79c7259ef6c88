//! HTTP client for the `/analyze` and `/chat` endpoints

use crate::backend::{AnalysisResult, Backend, ChatRequest, ChatResult};
use crate::config::Config;
use crate::error::{Result, ScreenerError};
use crate::input::UploadFile;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;

/// Single entry point for every call to the analysis service.
///
/// No retries, no timeouts, no caching: a failed call is reported once and
/// the user re-triggers it.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
    max_file_size: u64,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_file_size: 10 * 1024 * 1024,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend.base_url.clone()).with_max_file_size(config.max_file_size_bytes())
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackendClient {
    async fn analyze(&self, file: &UploadFile) -> Result<AnalysisResult> {
        if file.size() > self.max_file_size {
            warn!(
                "{} is {} bytes, above the {} byte upload limit; sending anyway",
                file.file_name,
                file.size(),
                self.max_file_size
            );
        }

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.endpoint("analyze");
        info!("Uploading {} to {}", file.file_name, url);

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            warn!("Analyze request returned {}", response.status());
            return Err(ScreenerError::Request("Analyze failed"));
        }

        let result: AnalysisResult = response.json().await?;
        debug!(
            "Analysis received ({} chars)",
            result.analysis.as_ref().map(|a| a.len()).unwrap_or(0)
        );

        Ok(result)
    }

    async fn chat(&self, message: &str) -> Result<ChatResult> {
        let url = self.endpoint("chat");
        debug!("Posting chat message to {}", url);

        // .json() sets the application/json content type
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Chat request returned {}", response.status());
            return Err(ScreenerError::Request("Chat failed"));
        }

        Ok(response.json().await?)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
