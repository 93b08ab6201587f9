//! FFmpeg audio normalization and compression.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Persists raw speech-provider audio to the two on-disk forms the pipeline
/// needs: a normalized mono waveform for transcription and a compressed
/// distribution copy for duration measurement and rendering.
#[async_trait]
pub trait AudioEncoder: Send + Sync {
    /// Decode `raw_audio` and write a mono 16 kHz PCM WAV to `wav_path`.
    async fn normalize(&self, raw_audio: &[u8], wav_path: &Path) -> MediaResult<()>;

    /// Compress the waveform at `wav_path` to an MP3 at `mp3_path`.
    async fn compress(&self, wav_path: &Path, mp3_path: &Path) -> MediaResult<()>;
}

/// `AudioEncoder` backed by the ffmpeg CLI.
#[derive(Debug, Default)]
pub struct FfmpegAudioEncoder;

#[async_trait]
impl AudioEncoder for FfmpegAudioEncoder {
    async fn normalize(&self, raw_audio: &[u8], wav_path: &Path) -> MediaResult<()> {
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let mut child = Command::new("ffmpeg")
            .args(["-y", "-i", "pipe:0", "-ac", "1", "-ar", "16000"])
            .arg(wav_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed the provider payload through stdin; the container format is
        // whatever the provider returned, ffmpeg sniffs it.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| MediaError::ffmpeg_failed("Failed to open ffmpeg stdin", None, None))?;
        stdin.write_all(raw_audio).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(MediaError::ffmpeg_failed(
                "Audio normalization failed",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ));
        }

        debug!(wav = %wav_path.display(), "Normalized narration audio");
        Ok(())
    }

    async fn compress(&self, wav_path: &Path, mp3_path: &Path) -> MediaResult<()> {
        if !wav_path.exists() {
            return Err(MediaError::FileNotFound(wav_path.to_path_buf()));
        }
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let output = Command::new("ffmpeg")
            .args(["-y", "-i"])
            .arg(wav_path)
            .args(["-codec:a", "libmp3lame", "-qscale:a", "4"])
            .arg(mp3_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::ffmpeg_failed(
                "Audio compression failed",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ));
        }

        debug!(mp3 = %mp3_path.display(), "Compressed narration audio");
        Ok(())
    }
}
