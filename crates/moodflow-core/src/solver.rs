//! Recommend/skip solver with heuristic-ordered backtracking.
//!
//! Each task is a variable over the boolean domain {recommend, skip}.
//! Variable selection uses MRV (fewest consistent domain values first) and
//! falls back to a degree heuristic over shared constraints. Backtracking
//! is chronological and tries `recommend` before `skip`.
//!
//! Every predicate inspects only the variable under test, never the rest
//! of the assignment, so the final recommend/skip partition equals the
//! per-task conjunction of the emotion, time, and resource predicates.
//! The heuristics change search effort and assignment order, not the
//! outcome; a task's verdict is invariant to the other tasks in the pool.

use crate::conditions::Conditions;
use crate::filter;
use crate::task::Task;

/// Solver result: recommended tasks plus advisory warnings.
#[derive(Debug, Clone)]
pub struct SolverOutcome<'a> {
    pub recommended: Vec<&'a Task>,
    pub warnings: Vec<String>,
}

/// Per-task recommend/skip solver over a pool of tasks.
pub struct EligibilitySolver<'a> {
    tasks: Vec<&'a Task>,
    ctx: &'a Conditions,
}

impl<'a> EligibilitySolver<'a> {
    pub fn new(tasks: &'a [Task], ctx: &'a Conditions) -> Self {
        Self {
            tasks: tasks.iter().collect(),
            ctx,
        }
    }

    /// Whether assigning `value` to the variable is consistent with the
    /// constraint predicates. Skipping a task is always consistent.
    fn consistent(&self, var: usize, value: bool) -> bool {
        if !value {
            return true;
        }
        let task = self.tasks[var];
        filter::emotion_admissible(task, self.ctx.current_emotion)
            && filter::time_admissible(task, self.ctx)
            && filter::resource_admissible(task, self.ctx)
    }

    /// MRV: the unassigned variable with the fewest consistent domain
    /// values. `None` only when no variable remains.
    fn select_mrv(&self, assignment: &[Option<bool>]) -> Option<usize> {
        assignment
            .iter()
            .enumerate()
            .filter(|(_, assigned)| assigned.is_none())
            .map(|(var, _)| {
                let legal = [true, false]
                    .iter()
                    .filter(|&&value| self.consistent(var, value))
                    .count();
                (legal, var)
            })
            .min_by_key(|&(legal, _)| legal)
            .map(|(_, var)| var)
    }

    /// Degree fallback: the variable sharing the most constraints with
    /// other unassigned variables, counting unsuitable-time coincidences
    /// and identical resource requirements.
    fn select_degree(&self, assignment: &[Option<bool>]) -> Option<usize> {
        let unassigned: Vec<usize> = assignment
            .iter()
            .enumerate()
            .filter(|(_, assigned)| assigned.is_none())
            .map(|(var, _)| var)
            .collect();

        unassigned
            .iter()
            .map(|&var| {
                let task = self.tasks[var];
                let degree: u32 = unassigned
                    .iter()
                    .filter(|&&other| other != var)
                    .map(|&other| {
                        let other_task = self.tasks[other];
                        let mut shared = 0;
                        if !task.is_time_suitable(self.ctx.current_time)
                            && !other_task.is_time_suitable(self.ctx.current_time)
                        {
                            shared += 1;
                        }
                        if let (Some(a), Some(b)) =
                            (&task.constraints.requires, &other_task.constraints.requires)
                        {
                            if a == b {
                                shared += 1;
                            }
                        }
                        shared
                    })
                    .sum();
                (degree, var)
            })
            .max_by_key(|&(degree, _)| degree)
            .map(|(_, var)| var)
    }

    /// Chronological backtracking, `recommend` tried before `skip`.
    fn backtrack(&self, assignment: &mut [Option<bool>], assigned: usize) -> bool {
        if assigned == self.tasks.len() {
            return true;
        }

        let var = match self
            .select_mrv(assignment)
            .or_else(|| self.select_degree(assignment))
        {
            Some(var) => var,
            None => return true,
        };

        for value in [true, false] {
            if self.consistent(var, value) {
                assignment[var] = Some(value);
                if self.backtrack(assignment, assigned + 1) {
                    return true;
                }
                assignment[var] = None;
            }
        }

        false
    }

    /// Solve and return recommended tasks with advisory warnings for any
    /// recommended task that is time-unsuitable or resource-short.
    pub fn solve(&self) -> SolverOutcome<'a> {
        let mut assignment = vec![None; self.tasks.len()];
        if !self.backtrack(&mut assignment, 0) {
            return SolverOutcome {
                recommended: Vec::new(),
                warnings: vec!["no consistent assignment found".to_string()],
            };
        }

        let mut recommended = Vec::new();
        let mut warnings = Vec::new();
        for (var, value) in assignment.iter().enumerate() {
            if *value != Some(true) {
                continue;
            }
            let task = self.tasks[var];
            recommended.push(task);

            if !task.is_time_suitable(self.ctx.current_time) {
                warnings.push(format!(
                    "{}: may not be suitable for the current time",
                    task.name
                ));
            }
            if !task.resources_available(self.ctx) {
                if let Some(requires) = &task.constraints.requires {
                    warnings.push(format!("{}: requires {}", task.name, requires.names().join(", ")));
                }
            }
        }

        SolverOutcome {
            recommended,
            warnings,
        }
    }
}

/// Solve a pool in one call.
pub fn solve_pool<'a>(tasks: &'a [Task], ctx: &'a Conditions) -> SolverOutcome<'a> {
    EligibilitySolver::new(tasks, ctx).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::task::{Requires, TaskCategory, TaskType};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn make_task(name: &str, emotions: Vec<Emotion>) -> Task {
        Task::new(name, 5, TaskCategory::Work, 30, emotions)
    }

    #[test]
    fn recommends_tasks_passing_all_predicates() {
        let tasks = vec![
            make_task("Study", vec![Emotion::Neutral, Emotion::Focused]),
            make_task("Nap", vec![Emotion::Tired]),
        ];
        let ctx = Conditions::new(at(10));

        let outcome = solve_pool(&tasks, &ctx);
        assert_eq!(outcome.recommended.len(), 1);
        assert_eq!(outcome.recommended[0].name, "Study");
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn verdict_invariant_to_pool_composition() {
        let target = make_task("Study", vec![Emotion::Neutral]);
        let ctx = Conditions::new(at(10));

        let alone = vec![target.clone()];
        let alone_verdict = solve_pool(&alone, &ctx)
            .recommended
            .iter()
            .any(|t| t.name == "Study");

        let mut crowd = vec![
            make_task("Nap", vec![Emotion::Tired]),
            make_task("Run", vec![Emotion::Happy]),
        ];
        crowd.push(target.clone());
        crowd.push(make_task("Call", vec![Emotion::Neutral]));
        let crowd_verdict = solve_pool(&crowd, &ctx)
            .recommended
            .iter()
            .any(|t| t.name == "Study");

        assert_eq!(alone_verdict, crowd_verdict);
        assert!(alone_verdict);
    }

    #[test]
    fn mismatched_pool_yields_empty_result() {
        let tasks = vec![make_task("Nap", vec![Emotion::Tired])];
        let ctx = Conditions::new(at(10)); // neutral
        let outcome = solve_pool(&tasks, &ctx);
        assert!(outcome.recommended.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn resource_short_tasks_are_skipped() {
        let mut walk = make_task("Walk", vec![Emotion::Neutral]);
        walk.constraints.requires = Some(Requires::One("outdoors".to_string()));
        let tasks = vec![walk];

        let ctx = Conditions::new(at(10));
        assert!(solve_pool(&tasks, &ctx).recommended.is_empty());

        let ctx = ctx.with_resources(["outdoors"]);
        assert_eq!(solve_pool(&tasks, &ctx).recommended.len(), 1);
    }

    #[test]
    fn must_do_bypass_applies_inside_solver() {
        let mut urgent = make_task("Taxes", vec![Emotion::Focused]);
        urgent.task_type = TaskType::MustDo;
        urgent.base_priority = 9;
        let tasks = vec![urgent];

        let ctx = Conditions::new(at(10)).with_emotion(Emotion::Sad);
        let outcome = solve_pool(&tasks, &ctx);
        assert_eq!(outcome.recommended.len(), 1);
    }

    #[test]
    fn empty_pool() {
        let ctx = Conditions::new(at(10));
        let outcome = solve_pool(&[], &ctx);
        assert!(outcome.recommended.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
