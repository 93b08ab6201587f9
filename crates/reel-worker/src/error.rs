//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Provider error: {0}")]
    Provider(#[from] reel_providers::ProviderError),

    #[error("Media error: {0}")]
    Media(#[from] reel_media::MediaError),

    #[error("Speech provider '{0}' lists no voices")]
    NoVoices(String),

    #[error("Music catalog is empty")]
    EmptyMusicCatalog,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
