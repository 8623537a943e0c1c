use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Admin session required")]
    NotAuthorized,
}

impl AppError {
    /// True for failures the gateway swallows and turns into safe defaults.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_)
                | AppError::Status { .. }
                | AppError::Decode(_)
                | AppError::MalformedRecord(_)
        )
    }
}
