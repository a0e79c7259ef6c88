//! Backend access
//! The remote analysis service is reached only through the `Backend` trait

pub mod client;

use crate::error::Result;
use crate::input::UploadFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use client::HttpBackendClient;

/// Body returned by `POST /analyze`, kept verbatim.
///
/// Any JSON value decodes. Only a string `analysis` is lifted out; everything
/// else, including `status` and a non-string `analysis`, stays in `extra`.
/// A body that is not an object decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl From<serde_json::Value> for AnalysisResult {
    fn from(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut fields) = value else {
            return Self::default();
        };

        let analysis = match fields.remove("analysis") {
            Some(serde_json::Value::String(text)) => Some(text),
            Some(other) => {
                fields.insert("analysis".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            analysis,
            extra: fields.into_iter().collect(),
        }
    }
}

/// Body returned by `POST /chat`, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Calls to the analysis service. Implement this to swap the HTTP client for
/// a test double without touching the controller.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Upload a resume for analysis.
    async fn analyze(&self, file: &UploadFile) -> Result<AnalysisResult>;

    /// Ask the backend chat assistant a question.
    async fn chat(&self, message: &str) -> Result<ChatResult>;

    /// Base URL requests are sent to, for user-facing messages.
    fn base_url(&self) -> &str;
}
