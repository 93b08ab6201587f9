//! Provider contracts for the ReelSmith pipeline.
//!
//! Speech synthesis, transcription, footage search, and rendering are
//! external collaborators consumed through the narrow async traits here.
//! Concrete engines register with [`ProviderRegistry`] under a string key
//! and are instantiated lazily, once per key.

pub mod error;
pub mod fetch;
pub mod footage;
pub mod pexels;
pub mod registry;
pub mod render;
pub mod speech;
pub mod transcription;

pub use error::{ProviderError, ProviderResult};
pub use fetch::{FootageFetcher, HttpFetcher};
pub use footage::{find_with_fallback, FootageHit, FootageProvider, FALLBACK_SEARCH_TERMS};
pub use pexels::{PexelsConfig, PexelsFootage};
pub use registry::{ProviderRegistry, SpeechFactory};
pub use render::Renderer;
pub use speech::{CatalogSource, SpeechAudio, SpeechProvider, VoiceCatalog};
pub use transcription::TranscriptionProvider;
