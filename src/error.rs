//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    /// The request never produced an HTTP response (DNS, refused connection,
    /// aborted body) or the body could not be decoded.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a status outside the 2xx range.
    #[error("{0}")]
    Request(&'static str),

    /// Client-side precondition failure; never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ScreenerError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ScreenerError::Transport(_))
    }

    pub fn is_request(&self) -> bool {
        matches!(self, ScreenerError::Request(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ScreenerError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScreenerError {
    fn from(err: anyhow::Error) -> Self {
        ScreenerError::Configuration(err.to_string())
    }
}
