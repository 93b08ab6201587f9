//! Transcription contract.

use async_trait::async_trait;
use std::path::Path;

use reel_models::Caption;

use crate::error::ProviderResult;

/// Derives word/phrase-level captions from a normalized waveform file.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Captions with millisecond timestamps, in playback order.
    async fn create_captions(&self, audio_path: &Path) -> ProviderResult<Vec<Caption>>;
}
