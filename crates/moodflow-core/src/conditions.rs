//! Per-decision-cycle context supplied by the caller.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

fn default_energy() -> u8 {
    5
}

/// Ephemeral conditions for one decision cycle.
///
/// Carries the single `current_time` every predicate, score term, and
/// search step reads; the engine never samples the wall clock itself.
/// Not persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub current_time: NaiveDateTime,
    #[serde(default)]
    pub available_resources: Vec<String>,
    /// Current energy on a 1-10 scale.
    #[serde(default = "default_energy")]
    pub current_energy: u8,
    #[serde(default)]
    pub current_emotion: Emotion,
    /// Flat bonus added to every score in this cycle.
    #[serde(default)]
    pub preference_bonus: f64,
    /// Deadline-urgency bonus the caller chose to apply in this cycle.
    #[serde(default)]
    pub urgency_bonus: f64,
}

impl Conditions {
    /// Conditions at a given time with neutral emotion, default energy,
    /// no resources, and zero bonuses.
    pub fn new(current_time: NaiveDateTime) -> Self {
        Self {
            current_time,
            available_resources: Vec::new(),
            current_energy: default_energy(),
            current_emotion: Emotion::Neutral,
            preference_bonus: 0.0,
            urgency_bonus: 0.0,
        }
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.current_emotion = emotion;
        self
    }

    pub fn with_energy(mut self, energy: u8) -> Self {
        self.current_energy = energy;
        self
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_resource(&self, name: &str) -> bool {
        self.available_resources.iter().any(|r| r == name)
    }

    pub fn today(&self) -> NaiveDate {
        self.current_time.date()
    }

    /// Fatigue is the inverse of energy on the same scale: `10 - energy`.
    pub fn fatigue(&self) -> f64 {
        (10.0 - self.current_energy as f64).max(0.0)
    }
}
