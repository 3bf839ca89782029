use thiserror::Error;

/// Input rejected by a descriptor before any request was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {reason}")]
pub struct InvalidInput {
    pub reason: String,
}

impl InvalidInput {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Response bytes that did not match the schema a descriptor expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode response: {message}")]
pub struct DecodeError {
    pub message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The single failure a [`RequestLoader::load`](crate::RequestLoader::load) call can end with.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// Network or IO failure reported by the transport. The cause chain is kept.
    #[error("transport failure: {0}")]
    Transport(#[source] anyhow::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl LoadError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LoadError::InvalidInput(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, LoadError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, LoadError::Decode(_))
    }
}
