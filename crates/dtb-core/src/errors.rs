/// Core error type for the translation relay.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can treat failures uniformly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("model error: {message}")]
    Model { retryable: bool, message: String },

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    pub fn model(retryable: bool, message: impl Into<String>) -> Self {
        Error::Model {
            retryable,
            message: message.into(),
        }
    }

    /// Whether the failure looks transient (rate limit, timeout, 5xx).
    ///
    /// Nothing in the core retries; this only feeds log output.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Model { retryable: true, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
