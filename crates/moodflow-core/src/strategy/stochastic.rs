//! Uniform random choice among admissible tasks.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::conditions::Conditions;
use crate::filter::apply_strict_constraints;
use crate::task::Task;

/// Pick uniformly at random from the strictly filtered pool. A sole
/// survivor is returned directly. The RNG is injected so callers can seed
/// outcomes for reproducibility.
pub fn stochastic<'a, R: Rng + ?Sized>(
    tasks: &'a [Task],
    ctx: &Conditions,
    rng: &mut R,
) -> Option<&'a Task> {
    let valid = apply_strict_constraints(tasks, ctx);
    if valid.len() == 1 {
        return Some(valid[0]);
    }
    valid.choose(rng).copied()
}
