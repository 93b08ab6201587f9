//! The manifest handed to the external rendering engine.

use serde::{Deserialize, Serialize};

use crate::config::{CaptionPosition, MusicVolume};
use crate::music::MusicTrack;
use crate::scene::AssembledScene;

/// Everything the rendering engine needs to composite one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderManifest {
    /// Assembled scenes in playback order
    pub scenes: Vec<AssembledScene>,
    /// Background music, if the catalog produced a track
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<MusicTrack>,
    /// Total video duration in milliseconds, padding included
    pub duration_ms: u64,
    /// Trailing padding echoed for the renderer's timeline
    pub padding_back_ms: u64,
    pub caption_position: CaptionPosition,
    pub music_volume: MusicVolume,
}

impl RenderManifest {
    /// Total duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}
