//! Constraint predicates and the strict admissibility filter.
//!
//! Three reusable per-task checks (emotion, time, resources) and the
//! filter that applies them in sequence. This is the common admissibility
//! gate for the greedy, hill-climbing, and stochastic selectors and the
//! sequence planner; the eligibility solver evaluates the same predicates
//! under heuristic ordering.

use serde::{Deserialize, Serialize};

use crate::conditions::Conditions;
use crate::emotion::Emotion;
use crate::task::{Task, TaskType};

/// Emotion predicate: the current emotion must appear in the task's fit
/// set. High-priority must-do tasks (priority >= 7) bypass the check.
pub fn emotion_admissible(task: &Task, emotion: Emotion) -> bool {
    task.suits(emotion) || (task.task_type == TaskType::MustDo && task.base_priority >= 7)
}

/// Time predicate: none of the task's hard time flags may be violated at
/// the given moment.
pub fn time_admissible(task: &Task, ctx: &Conditions) -> bool {
    task.is_time_suitable(ctx.current_time)
}

/// Resource predicate: calendar gate open, every required resource
/// available, and the duration within the max-time budget.
pub fn resource_admissible(task: &Task, ctx: &Conditions) -> bool {
    task.resources_available(ctx)
}

/// Apply the emotion, time, and resource predicates in sequence and keep
/// the survivors. The output is always a subset of the input.
pub fn apply_strict_constraints<'a>(tasks: &'a [Task], ctx: &Conditions) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| emotion_admissible(t, ctx.current_emotion))
        .filter(|t| time_admissible(t, ctx))
        .filter(|t| resource_admissible(t, ctx))
        .collect()
}

/// First predicate that removed a task from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    EmotionMismatch,
    TimeUnsuitable,
    ResourceMissing,
}

/// Per-task exclusion report, for explaining why a pool produced no
/// recommendation. Admitted tasks are not listed.
pub fn diagnose<'a>(tasks: &'a [Task], ctx: &Conditions) -> Vec<(&'a Task, Exclusion)> {
    tasks
        .iter()
        .filter_map(|t| {
            if !emotion_admissible(t, ctx.current_emotion) {
                Some((t, Exclusion::EmotionMismatch))
            } else if !time_admissible(t, ctx) {
                Some((t, Exclusion::TimeUnsuitable))
            } else if !resource_admissible(t, ctx) {
                Some((t, Exclusion::ResourceMissing))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Requires, TaskCategory};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn walk_task() -> Task {
        let mut task = Task::new(
            "Walk",
            6,
            TaskCategory::MoodEnhancer,
            20,
            vec![Emotion::Sad],
        );
        task.constraints.requires = Some(Requires::One("outdoors".to_string()));
        task
    }

    #[test]
    fn missing_resource_excludes_task() {
        let tasks = vec![walk_task()];
        let ctx = Conditions::new(at(10)).with_emotion(Emotion::Sad);

        assert!(emotion_admissible(&tasks[0], Emotion::Sad));
        assert!(!resource_admissible(&tasks[0], &ctx));
        assert!(apply_strict_constraints(&tasks, &ctx).is_empty());
    }

    #[test]
    fn output_is_subset_of_input() {
        let tasks = vec![
            walk_task(),
            Task::new("Read", 5, TaskCategory::Personal, 30, vec![Emotion::Sad]),
            Task::new("Study", 5, TaskCategory::Academic, 60, vec![Emotion::Focused]),
        ];
        let ctx = Conditions::new(at(10))
            .with_emotion(Emotion::Sad)
            .with_resources(["outdoors"]);

        let kept = apply_strict_constraints(&tasks, &ctx);
        assert!(kept.len() <= tasks.len());
        for task in &kept {
            assert!(tasks.iter().any(|t| std::ptr::eq(t, *task)));
        }
        assert_eq!(
            kept.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            ["Walk", "Read"]
        );
    }

    #[test]
    fn must_do_bypasses_emotion_only() {
        let mut urgent = Task::new("Taxes", 9, TaskCategory::TodoMust, 60, vec![Emotion::Focused]);
        urgent.task_type = TaskType::MustDo;
        let mild = Task::new("Journal", 5, TaskCategory::Personal, 15, vec![Emotion::Focused]);
        let tasks = vec![urgent, mild];

        let ctx = Conditions::new(at(10)).with_emotion(Emotion::Sad);
        let kept = apply_strict_constraints(&tasks, &ctx);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Taxes");
    }

    #[test]
    fn diagnose_reports_first_failing_predicate() {
        let mut late = Task::new("Standup", 5, TaskCategory::Work, 15, vec![Emotion::Neutral]);
        late.constraints.time_flags.morning_only = true;
        let tasks = vec![walk_task(), late];

        let ctx = Conditions::new(at(15)); // neutral, afternoon, no resources
        let report = diagnose(&tasks, &ctx);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].1, Exclusion::EmotionMismatch); // Walk suits sad only
        assert_eq!(report[1].1, Exclusion::TimeUnsuitable);
    }
}
