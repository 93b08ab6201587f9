//! Background music moods and tracks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Mood tag attached to each catalog track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicMood {
    Sad,
    Melancholic,
    Happy,
    Euphoric,
    Excited,
    Chill,
    Uneasy,
    Angry,
    Dark,
    Hopeful,
    Contemplative,
    Funny,
}

impl MusicMood {
    pub const ALL: &'static [MusicMood] = &[
        MusicMood::Sad,
        MusicMood::Melancholic,
        MusicMood::Happy,
        MusicMood::Euphoric,
        MusicMood::Excited,
        MusicMood::Chill,
        MusicMood::Uneasy,
        MusicMood::Angry,
        MusicMood::Dark,
        MusicMood::Hopeful,
        MusicMood::Contemplative,
        MusicMood::Funny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicMood::Sad => "sad",
            MusicMood::Melancholic => "melancholic",
            MusicMood::Happy => "happy",
            MusicMood::Euphoric => "euphoric",
            MusicMood::Excited => "excited",
            MusicMood::Chill => "chill",
            MusicMood::Uneasy => "uneasy",
            MusicMood::Angry => "angry",
            MusicMood::Dark => "dark",
            MusicMood::Hopeful => "hopeful",
            MusicMood::Contemplative => "contemplative",
            MusicMood::Funny => "funny",
        }
    }
}

impl fmt::Display for MusicMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MusicMood {
    type Err = MusicMoodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MusicMood::ALL
            .iter()
            .find(|m| m.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| MusicMoodParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown music mood: {0}")]
pub struct MusicMoodParseError(String);

/// One track in the music catalog. Selected, never mutated; looping and
/// trimming are the rendering engine's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicTrack {
    /// Path or URL of the audio file
    pub file: String,
    pub mood: MusicMood,
    /// Usable region start, in seconds
    pub start: f64,
    /// Usable region end, in seconds
    pub end: f64,
}

impl MusicTrack {
    pub fn new(file: impl Into<String>, mood: MusicMood, start: f64, end: f64) -> Self {
        Self {
            file: file.into(),
            mood,
            start,
            end,
        }
    }
}
