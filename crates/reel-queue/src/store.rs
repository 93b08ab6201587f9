//! On-disk record of completed videos.

use std::path::{Path, PathBuf};

use reel_models::JobId;

use crate::error::QueueResult;

/// Output directory keyed by job id. Presence of `{job_id}.mp4` is the sole
/// "ready" signal; there is no separate metadata database.
#[derive(Debug, Clone)]
pub struct VideoStore {
    output_dir: PathBuf,
}

impl VideoStore {
    /// Open the store, creating the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> QueueResult<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Deterministic output path for a job.
    pub fn path_for(&self, job_id: &JobId) -> PathBuf {
        self.output_dir.join(format!("{}.mp4", job_id))
    }

    /// Whether a rendered video exists for this job.
    pub fn exists(&self, job_id: &JobId) -> bool {
        self.path_for(job_id).is_file()
    }

    /// Ids of all rendered videos on disk.
    pub fn list_ids(&self) -> QueueResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "mp4") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
