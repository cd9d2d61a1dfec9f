//! Local search over a task-similarity neighborhood.
//!
//! Starts from the best-scoring admissible task and repeatedly moves to
//! the best-scoring similar task, but only while the move strictly
//! improves the score. Neighbors are drawn from the whole pool, not just
//! the admissible subset, so the climb can surface a near-miss alternative
//! the strict filter would have hidden.

use crate::conditions::Conditions;
use crate::filter::apply_strict_constraints;
use crate::strategy::ScoredCandidate;
use crate::task::Task;

/// Similarity threshold above which two tasks count as neighbors.
const NEIGHBOR_THRESHOLD: f64 = 0.6;

/// Default bound on climbing iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Weighted similarity between two tasks in [0, 1].
///
/// Factors: Jaccard overlap of emotion fits (double weight), duration
/// ratio, priority closeness, task-type equality, category equality;
/// averaged over the applicable weights.
pub fn task_similarity(a: &Task, b: &Task) -> f64 {
    let mut similarity = 0.0;
    let mut factors = 0.0;

    let overlap = a
        .emotion_fit
        .iter()
        .filter(|e| b.emotion_fit.contains(e))
        .count();
    let union = a.emotion_fit.len()
        + b.emotion_fit
            .iter()
            .filter(|e| !a.emotion_fit.contains(e))
            .count();
    if union > 0 {
        similarity += overlap as f64 / union as f64 * 2.0;
        factors += 2.0;
    }

    if a.duration > 0 && b.duration > 0 {
        similarity += a.duration.min(b.duration) as f64 / a.duration.max(b.duration) as f64;
        factors += 1.0;
    }

    let priority_gap = (a.base_priority as f64 - b.base_priority as f64).abs();
    similarity += (10.0 - priority_gap) / 10.0;
    factors += 1.0;

    if a.task_type == b.task_type {
        similarity += 1.0;
    }
    factors += 1.0;

    if a.category == b.category {
        similarity += 1.0;
    }
    factors += 1.0;

    if factors > 0.0 {
        similarity / factors
    } else {
        0.5
    }
}

/// Climb from the best strictly-filtered task through the similarity
/// neighborhood, stopping at a local optimum or after `max_iterations`.
/// The result never scores below the starting candidate.
pub fn hill_climbing<'a>(
    tasks: &'a [Task],
    ctx: &Conditions,
    max_iterations: usize,
) -> Option<ScoredCandidate<'a>> {
    let valid = apply_strict_constraints(tasks, ctx);

    let score_of = |task: &Task| {
        task.compute_score(
            ctx.current_emotion,
            ctx.current_time,
            ctx.current_energy,
            0.0,
            0.0,
        )
    };

    let mut current = valid
        .iter()
        .map(|&task| ScoredCandidate {
            task,
            score: score_of(task),
        })
        .reduce(|best, candidate| {
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })?;

    for _ in 0..max_iterations {
        let best_neighbor = tasks
            .iter()
            .filter(|t| t.name != current.task.name)
            .filter(|t| task_similarity(current.task, t) >= NEIGHBOR_THRESHOLD)
            .map(|task| ScoredCandidate {
                task,
                score: score_of(task),
            })
            .reduce(|best, candidate| {
                if candidate.score > best.score {
                    candidate
                } else {
                    best
                }
            });

        match best_neighbor {
            Some(neighbor) if neighbor.score > current.score => current = neighbor,
            _ => break, // local optimum
        }
    }

    Some(current)
}
