//! Background music selection.

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use reel_models::{MusicMood, MusicTrack};

use crate::error::{WorkerError, WorkerResult};

/// Picks a background track for a finished video. The catalog is injected
/// by the embedding application; selection never loops or trims tracks,
/// that is the rendering engine's job.
#[derive(Debug, Clone)]
pub struct MusicSelector {
    catalog: Vec<MusicTrack>,
}

impl MusicSelector {
    pub fn new(catalog: Vec<MusicTrack>) -> Self {
        Self { catalog }
    }

    /// Uniform random pick among tracks matching `mood`, or among the whole
    /// catalog when no mood is set. A mood that matches nothing falls back
    /// to the whole catalog with a warning. Duration is informational only.
    pub fn select(
        &self,
        total_duration_seconds: f64,
        mood: Option<MusicMood>,
    ) -> WorkerResult<MusicTrack> {
        if self.catalog.is_empty() {
            return Err(WorkerError::EmptyMusicCatalog);
        }

        let matching: Vec<&MusicTrack> = match mood {
            Some(mood) => {
                let filtered: Vec<&MusicTrack> =
                    self.catalog.iter().filter(|t| t.mood == mood).collect();
                if filtered.is_empty() {
                    warn!(%mood, "No tracks match requested mood, using full catalog");
                    self.catalog.iter().collect()
                } else {
                    filtered
                }
            }
            None => self.catalog.iter().collect(),
        };

        let track = matching
            .choose(&mut rand::thread_rng())
            .copied()
            .cloned()
            .ok_or(WorkerError::EmptyMusicCatalog)?;

        debug!(
            file = %track.file,
            mood = %track.mood,
            video_seconds = total_duration_seconds,
            "Selected music track"
        );
        Ok(track)
    }
}
