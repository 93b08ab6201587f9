//! Queued job payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use reel_models::{JobId, RenderConfig, SceneInput};

/// One request to assemble a video, as held in the pending list.
///
/// Immutable except for queue position; popped when processing finishes,
/// regardless of outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedJob {
    /// Unique job ID
    pub id: JobId,
    /// Scenes in playback order
    pub scenes: Vec<SceneInput>,
    /// Rendering preferences
    pub config: RenderConfig,
    /// Enqueue timestamp, used for age-based eviction
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedJob {
    pub fn new(scenes: Vec<SceneInput>, config: RenderConfig) -> Self {
        Self {
            id: JobId::new(),
            scenes,
            config,
            enqueued_at: Utc::now(),
        }
    }

    /// Time spent in the queue so far.
    pub fn age(&self) -> Duration {
        Utc::now() - self.enqueued_at
    }

    pub fn age_seconds(&self) -> i64 {
        self.age().num_seconds()
    }
}
