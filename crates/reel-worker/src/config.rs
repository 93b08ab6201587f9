//! Worker configuration.

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Scratch directory; each job gets its own subdirectory
    pub work_dir: String,
    /// Speech engine used when a job does not name one
    pub default_speech_provider: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: "/tmp/reelsmith/work".to_string(),
            default_speech_provider: "kokoro".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("REEL_WORK_DIR")
                .unwrap_or_else(|_| "/tmp/reelsmith/work".to_string()),
            default_speech_provider: std::env::var("REEL_SPEECH_PROVIDER")
                .unwrap_or_else(|_| "kokoro".to_string()),
        }
    }
}
