//! Multi-objective ranking over score, duration, and success history.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::strategy::ScoredCandidate;
use crate::task::Task;

/// Number of results returned by the optimizer.
const TOP_N: usize = 3;

/// Weights for the blended objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Weight on the normalized score (quality).
    pub score: f64,
    /// Weight on inverted normalized duration (shorter is better).
    pub duration: f64,
    /// Weight on the historical success rate (reliability).
    pub success: f64,
}

impl ObjectiveWeights {
    /// Default balance: quality first, then brevity, then reliability.
    pub fn balanced() -> Self {
        Self {
            score: 0.5,
            duration: 0.3,
            success: 0.2,
        }
    }

    /// Validate that every weight lies in [0.0, 1.0].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let weights = [
            ("score", self.score),
            ("duration", self.duration),
            ("success", self.success),
        ];
        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ValidationError::InvalidValue {
                    field: name.to_string(),
                    message: format!("must be in [0.0, 1.0], got {weight}"),
                });
            }
        }
        Ok(())
    }

    /// Normalize weights to sum to 1.0.
    pub fn normalize(&mut self) {
        let sum = self.score + self.duration + self.success;
        if sum > 0.0 {
            self.score /= sum;
            self.duration /= sum;
            self.success /= sum;
        }
    }
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// A candidate with its combined multi-objective value.
#[derive(Debug, Clone, Copy)]
pub struct RankedObjective<'a> {
    pub task: &'a Task,
    pub combined: f64,
}

/// Rank scored candidates by the weighted blend of max-normalized score,
/// inverted max-normalized duration, and success rate. Returns at most
/// the top three, in non-increasing combined order.
pub fn rank<'a>(
    candidates: &[ScoredCandidate<'a>],
    weights: ObjectiveWeights,
) -> Vec<RankedObjective<'a>> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let max_score = candidates
        .iter()
        .map(|c| c.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_duration = candidates
        .iter()
        .map(|c| c.task.duration)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut ranked: Vec<RankedObjective<'a>> = candidates
        .iter()
        .map(|c| {
            let score_norm = if max_score > 0.0 { c.score / max_score } else { 0.0 };
            let duration_norm = 1.0 - c.task.duration as f64 / max_duration;
            let combined = weights.score * score_norm
                + weights.duration * duration_norm
                + weights.success * c.task.success_rate;
            RankedObjective {
                task: c.task,
                combined,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.combined.total_cmp(&a.combined));
    ranked.truncate(TOP_N);
    ranked
}
