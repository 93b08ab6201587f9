//! Speech synthesis contract.

use async_trait::async_trait;

use crate::error::ProviderResult;

/// Raw synthesis output plus the provider's duration estimate.
///
/// The estimate is typically derived from text length or payload size, not a
/// decode; the pipeline replaces it with a measured value once the audio is
/// on disk.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// Encoded audio payload as returned by the provider
    pub audio: Vec<u8>,
    /// Provider's estimate of the spoken duration, in seconds
    pub estimated_duration_seconds: f64,
}

/// Where a voice catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched from the provider's live API
    Remote,
    /// Static fallback list used when the remote catalog is unavailable
    Fallback,
}

/// Voices a provider can synthesize with, and where the list came from.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    pub voices: Vec<String>,
    pub source: CatalogSource,
}

impl VoiceCatalog {
    pub fn remote(voices: Vec<String>) -> Self {
        Self {
            voices,
            source: CatalogSource::Remote,
        }
    }

    pub fn fallback(voices: Vec<String>) -> Self {
        Self {
            voices,
            source: CatalogSource::Fallback,
        }
    }

    pub fn supports(&self, voice: &str) -> bool {
        self.voices.iter().any(|v| v == voice)
    }

    /// The provider's default voice: the first one it lists.
    pub fn default_voice(&self) -> Option<&str> {
        self.voices.first().map(String::as_str)
    }
}

/// A pluggable speech synthesis engine.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` with `voice`. An empty payload is an error.
    async fn generate(&self, text: &str, voice: &str) -> ProviderResult<SpeechAudio>;

    /// Voices this engine supports.
    async fn list_voices(&self) -> ProviderResult<VoiceCatalog>;

    /// Engine key for logging.
    fn name(&self) -> &str;
}
