//! Queue error types.

use thiserror::Error;

use reel_models::scene::SceneValidationError;

pub type QueueResult<T> = Result<T, QueueError>;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Invalid job input: {0}")]
    InvalidInput(String),

    #[error("Invalid scene: {0}")]
    InvalidScene(#[from] SceneValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueueError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
