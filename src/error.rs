use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: field '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Scoring rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("HTTP error: {0}")]
    Http(#[from] axum::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// True when the caller sent a request the service cannot score, as
    /// opposed to the service itself failing.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
