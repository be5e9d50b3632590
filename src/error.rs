/// Fallback text shown when the server gives no usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum DrobbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Domain(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DrobbError {
    /// Text suitable for a user-facing notice.
    ///
    /// Server-provided messages and local validation/domain messages are
    /// passed through; transport and decoding failures collapse into the
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            DrobbError::Api { message, .. } => message.clone(),
            DrobbError::Validation(msg)
            | DrobbError::Auth(msg)
            | DrobbError::Domain(msg)
            | DrobbError::NotFound(msg) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// True for failures that happened before any request was dispatched.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            DrobbError::Validation(_) | DrobbError::Auth(_) | DrobbError::Domain(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DrobbError>;
