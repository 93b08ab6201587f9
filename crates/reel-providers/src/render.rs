//! Render handoff contract.

use async_trait::async_trait;

use reel_models::{JobId, Orientation, RenderManifest};

use crate::error::ProviderResult;

/// The external rendering engine that composites video, audio, and captions
/// into the final file.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render `manifest` to the deterministic output path keyed by `job_id`.
    /// A successful return implies the video file now exists.
    async fn render(
        &self,
        manifest: &RenderManifest,
        job_id: &JobId,
        orientation: Orientation,
    ) -> ProviderResult<()>;
}
