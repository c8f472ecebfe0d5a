use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered 400; it never says more than `Undefined input`.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl BlogClientError {
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, BlogClientError::InvalidRequest(_))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, BlogClientError::ServerError(_))
    }
}
