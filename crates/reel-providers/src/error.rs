//! Provider error types.

use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown provider key: {0}")]
    UnknownProvider(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Speech provider returned an empty audio payload")]
    EmptyAudio,

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Footage search timed out: {0}")]
    FootageTimeout(String),

    #[error("No footage found for search terms")]
    FootageNotFound,

    #[error("Footage search failed: {0}")]
    FootageSearch(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    pub fn speech(msg: impl Into<String>) -> Self {
        Self::Speech(msg.into())
    }

    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    pub fn download_failed(msg: impl Into<String>) -> Self {
        Self::DownloadFailed(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether a download-level retry may help.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::DownloadFailed(_) => true,
            _ => false,
        }
    }
}
