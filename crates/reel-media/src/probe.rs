//! FFprobe audio duration measurement.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output format (format section only).
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Measures the decodable duration of an audio file.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Duration in seconds.
    async fn measure(&self, path: &Path) -> MediaResult<f64>;
}

/// `DurationProbe` backed by the ffprobe CLI.
#[derive(Debug, Default)]
pub struct FfprobeDurations;

#[async_trait]
impl DurationProbe for FfprobeDurations {
    async fn measure(&self, path: &Path) -> MediaResult<f64> {
        measure_duration(path).await
    }
}

/// Probe an audio file for its decodable duration in seconds.
pub async fn measure_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    // Check FFprobe exists
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe failed",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MediaError::InvalidAudio("No duration in probe output".to_string()))
}
