//! Audio plumbing for the ReelSmith pipeline.
//!
//! Wraps the ffmpeg/ffprobe CLIs for audio normalization, compression, and
//! duration measurement. The encode and probe surfaces are traits so the
//! pipeline can run against stubs where the toolchain is unavailable.

pub mod encode;
pub mod error;
pub mod probe;
pub mod reconcile;

pub use encode::{AudioEncoder, FfmpegAudioEncoder};
pub use error::{MediaError, MediaResult};
pub use probe::{DurationProbe, FfprobeDurations};
pub use reconcile::reconcile_duration;
