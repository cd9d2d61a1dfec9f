//! Greedy selection: the single best-scoring admissible task.

use crate::conditions::Conditions;
use crate::filter::apply_strict_constraints;
use crate::strategy::ScoredCandidate;
use crate::task::Task;

/// Pick the admissible task with the highest score. Ties go to the higher
/// base priority, then to the shorter duration, so repeated calls over the
/// same pool are deterministic. Returns `None` when nothing is admissible.
pub fn greedy<'a>(tasks: &'a [Task], ctx: &Conditions) -> Option<ScoredCandidate<'a>> {
    best_of(&apply_strict_constraints(tasks, ctx), ctx)
}

/// Greedy core over an already-admissible candidate list.
pub(crate) fn best_of<'a>(
    candidates: &[&'a Task],
    ctx: &Conditions,
) -> Option<ScoredCandidate<'a>> {
    let mut best: Option<ScoredCandidate<'a>> = None;

    for &task in candidates {
        let score = task.score_under(ctx);
        let better = match &best {
            None => true,
            Some(current) => {
                score > current.score
                    || (score == current.score
                        && (task.base_priority > current.task.base_priority
                            || (task.base_priority == current.task.base_priority
                                && task.duration < current.task.duration)))
            }
        };
        if better {
            best = Some(ScoredCandidate { task, score });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::task::TaskCategory;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn make_task(name: &str, priority: u8, duration: u32) -> Task {
        Task::new(
            name,
            priority,
            TaskCategory::Work,
            duration,
            vec![Emotion::Neutral],
        )
    }

    #[test]
    fn empty_pool_returns_none() {
        let ctx = Conditions::new(at(10));
        assert!(greedy(&[], &ctx).is_none());
    }

    #[test]
    fn all_excluded_returns_none() {
        let tasks = vec![Task::new(
            "Nap",
            5,
            TaskCategory::Break,
            20,
            vec![Emotion::Tired],
        )];
        let ctx = Conditions::new(at(10)); // neutral
        assert!(greedy(&tasks, &ctx).is_none());
    }

    #[test]
    fn picks_highest_score() {
        let tasks = vec![make_task("Low", 2, 30), make_task("High", 9, 30)];
        let ctx = Conditions::new(at(10));
        let pick = greedy(&tasks, &ctx).unwrap();
        assert_eq!(pick.task.name, "High");
        assert!(pick.score > 0.1);
    }

    #[test]
    fn duration_breaks_score_and_priority_ties() {
        // Identical except duration, so scores and priorities tie.
        let tasks = vec![make_task("A", 9, 10), make_task("B", 9, 5)];
        let ctx = Conditions::new(at(10));
        let pick = greedy(&tasks, &ctx).unwrap();
        assert_eq!(pick.task.name, "B");
    }

    #[test]
    fn priority_breaks_score_ties_before_duration() {
        // Equalize scores by compensating priority with energy mismatch.
        let mut a = make_task("A", 6, 5);
        a.constraints.energy_required = 5;
        let mut b = make_task("B", 8, 30);
        b.constraints.energy_required = 7; // -2 energy term vs A
        let ctx = Conditions::new(at(10)).with_energy(5);

        let score_a = a.score_under(&ctx);
        let score_b = b.score_under(&ctx);
        assert_eq!(score_a, score_b);

        let tasks = vec![a, b];
        let pick = greedy(&tasks, &ctx).unwrap();
        assert_eq!(pick.task.name, "B");
    }
}
