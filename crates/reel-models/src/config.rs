//! Render configuration and its enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::music::MusicMood;

/// Output orientation, which drives footage aspect selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// 9:16 vertical output for Shorts/Reels
    #[default]
    Portrait,
    /// 16:9 horizontal output
    Landscape,
}

impl Orientation {
    pub fn width(&self) -> u32 {
        match self {
            Orientation::Portrait => 1080,
            Orientation::Landscape => 1920,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Orientation::Portrait => 1920,
            Orientation::Landscape => 1080,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(OrientationParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown orientation: {0}")]
pub struct OrientationParseError(String);

/// Where captions are drawn on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

impl CaptionPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionPosition::Top => "top",
            CaptionPosition::Center => "center",
            CaptionPosition::Bottom => "bottom",
        }
    }
}

/// Background music loudness, applied by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MusicVolume {
    Muted,
    Low,
    Medium,
    #[default]
    High,
}

impl MusicVolume {
    /// Linear gain applied to the music track.
    pub fn level(&self) -> f32 {
        match self {
            MusicVolume::Muted => 0.0,
            MusicVolume::Low => 0.25,
            MusicVolume::Medium => 0.45,
            MusicVolume::High => 0.7,
        }
    }
}

/// Per-job rendering preferences. Absent fields fall back to defaults;
/// unrecognized JSON fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Extra trailing duration added to the final scene, in milliseconds
    #[serde(default)]
    pub padding_back_ms: u64,

    /// Mood filter for background music; any track when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_mood: Option<MusicMood>,

    /// Requested narration voice; provider default when unset or unsupported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Speech engine key; the registry default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_provider: Option<String>,

    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default)]
    pub caption_position: CaptionPosition,

    #[serde(default)]
    pub music_volume: MusicVolume,

    /// Long-form jobs get the larger queue time budget
    #[serde(default)]
    pub long_form: bool,
}
