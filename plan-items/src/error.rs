use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{call} returned {status}")]
    Backend {
        call: String,
        status: u16,
        message: Option<String>,
    },
    #[error("Failed to call {call}: {source}")]
    Transport {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to parse {call} response: {source}")]
    Parse {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid URL: {0}")]
    Url(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// The backend's own explanation, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}
