//! Shared data models for the ReelSmith pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and their terminal statuses
//! - Scene inputs, captions, and assembled scenes
//! - Render configuration (orientation, caption placement, music)
//! - The manifest handed to the rendering engine

pub mod config;
pub mod job;
pub mod manifest;
pub mod music;
pub mod scene;

// Re-export common types
pub use config::{CaptionPosition, MusicVolume, Orientation, RenderConfig};
pub use job::{JobId, JobStatus};
pub use manifest::RenderManifest;
pub use music::{MusicMood, MusicTrack};
pub use scene::{AssembledScene, Caption, SceneInput};
