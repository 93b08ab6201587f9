//! Footage search contract and fallback-term retry.

use async_trait::async_trait;
use tracing::warn;

use reel_models::Orientation;

use crate::error::{ProviderError, ProviderResult};

/// Generic terms tried one at a time when a scene's own terms find nothing.
pub const FALLBACK_SEARCH_TERMS: &[&str] = &["nature", "globe", "space", "ocean"];

/// One stock-footage candidate.
#[derive(Debug, Clone)]
pub struct FootageHit {
    /// Provider-scoped id, used for per-job exclusion
    pub id: String,
    /// Direct download URL of the chosen file
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A pluggable stock-footage search engine.
#[async_trait]
pub trait FootageProvider: Send + Sync {
    /// Find one clip of at least `min_duration_seconds` matching `terms`,
    /// skipping `exclude_ids`. A timeout must surface as
    /// [`ProviderError::FootageTimeout`], distinct from
    /// [`ProviderError::FootageNotFound`].
    async fn find(
        &self,
        terms: &[String],
        min_duration_seconds: f64,
        exclude_ids: &[String],
        orientation: Orientation,
    ) -> ProviderResult<FootageHit>;
}

/// Search with the scene's terms first, then the generic fallback terms one
/// at a time. Timeouts abort immediately; retrying a different term against
/// a provider that is not answering only burns its rate limit.
pub async fn find_with_fallback(
    provider: &dyn FootageProvider,
    terms: &[String],
    min_duration_seconds: f64,
    exclude_ids: &[String],
    orientation: Orientation,
) -> ProviderResult<FootageHit> {
    match provider
        .find(terms, min_duration_seconds, exclude_ids, orientation)
        .await
    {
        Ok(hit) => return Ok(hit),
        Err(e @ ProviderError::FootageTimeout(_)) => return Err(e),
        Err(ProviderError::FootageNotFound) => {
            warn!(?terms, "Primary search terms found no footage, trying fallbacks");
        }
        Err(e) => return Err(e),
    }

    for fallback in FALLBACK_SEARCH_TERMS {
        let fallback_terms = vec![fallback.to_string()];
        match provider
            .find(&fallback_terms, min_duration_seconds, exclude_ids, orientation)
            .await
        {
            Ok(hit) => {
                warn!(term = fallback, "Using fallback footage");
                return Ok(hit);
            }
            Err(e @ ProviderError::FootageTimeout(_)) => return Err(e),
            Err(ProviderError::FootageNotFound) => continue,
            Err(e) => return Err(e),
        }
    }

    Err(ProviderError::FootageNotFound)
}
