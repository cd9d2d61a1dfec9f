//! Emotion vocabulary shared across the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An emotional state the engine can reason about.
///
/// The first seven variants form the detector vocabulary an emotion
/// provider can produce. The remaining four are extended states used by
/// sequence prediction and time-window logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    #[default]
    Neutral,
    Tired,
    Stressed,
    Focused,
    Calm,
}

impl Emotion {
    /// Labels an emotion provider can produce.
    pub const DETECTOR_LABELS: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Parse a normalized lowercase label. Unknown labels yield `None`;
    /// callers decide the fallback (typically [`Emotion::Neutral`]).
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "angry" => Some(Self::Angry),
            "disgust" => Some(Self::Disgust),
            "fear" => Some(Self::Fear),
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "surprise" => Some(Self::Surprise),
            "neutral" => Some(Self::Neutral),
            "tired" => Some(Self::Tired),
            "stressed" => Some(Self::Stressed),
            "focused" => Some(Self::Focused),
            "calm" => Some(Self::Calm),
            _ => None,
        }
    }

    /// Lowercase label for this emotion.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Disgust => "disgust",
            Self::Fear => "fear",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
            Self::Tired => "tired",
            Self::Stressed => "stressed",
            Self::Focused => "focused",
            Self::Calm => "calm",
        }
    }

    /// States treated as negative by mood-lifting logic and fallback
    /// sequencing.
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Sad | Self::Angry | Self::Tired | Self::Stressed)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
