//! Single-task selection strategies over the strictly filtered pool.

mod greedy;
mod hill_climb;
mod stochastic;

pub use greedy::greedy;
pub(crate) use greedy::best_of;
pub use hill_climb::{hill_climbing, task_similarity, DEFAULT_MAX_ITERATIONS};
pub use stochastic::stochastic;

use crate::task::Task;

/// A task paired with the score it received in this call.
///
/// Scores are per-call values, not durable task state; two cycles with
/// different conditions produce independent candidates.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub task: &'a Task,
    pub score: f64,
}
