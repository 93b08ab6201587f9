//! Scene inputs, captions, and assembled scenes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One narration unit supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneInput {
    /// Text to narrate
    pub text: String,
    /// Keywords used to search for matching stock footage, in priority order
    pub search_terms: Vec<String>,
}

impl SceneInput {
    pub fn new(text: impl Into<String>, search_terms: Vec<String>) -> Self {
        Self {
            text: text.into(),
            search_terms,
        }
    }

    /// Validate the scene before it may enter the queue.
    pub fn validate(&self) -> Result<(), SceneValidationError> {
        if self.text.trim().is_empty() {
            return Err(SceneValidationError::EmptyText);
        }
        if self.search_terms.is_empty() {
            return Err(SceneValidationError::NoSearchTerms);
        }
        if self.search_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(SceneValidationError::BlankSearchTerm);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneValidationError {
    #[error("Scene text must not be empty")]
    EmptyText,
    #[error("Scene needs at least one search term")]
    NoSearchTerms,
    #[error("Search terms must not be blank")]
    BlankSearchTerm,
}

/// A caption line with millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Caption {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }
}

/// A fully assembled scene, immutable once appended to the job result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledScene {
    /// Word/phrase-level captions in playback order
    pub captions: Vec<Caption>,
    /// Local path or URL of the downloaded footage
    pub footage_ref: String,
    /// Local path of the compressed narration audio
    pub audio_ref: String,
    /// Authoritative scene duration, after reconciliation and padding
    pub audio_duration_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_validation() {
        let ok = SceneInput::new("hello", vec!["dog".into()]);
        assert!(ok.validate().is_ok());

        let empty = SceneInput::new("   ", vec!["dog".into()]);
        assert_eq!(empty.validate(), Err(SceneValidationError::EmptyText));

        let no_terms = SceneInput::new("hello", vec![]);
        assert_eq!(no_terms.validate(), Err(SceneValidationError::NoSearchTerms));

        let blank_term = SceneInput::new("hello", vec!["".into()]);
        assert_eq!(
            blank_term.validate(),
            Err(SceneValidationError::BlankSearchTerm)
        );
    }
}
