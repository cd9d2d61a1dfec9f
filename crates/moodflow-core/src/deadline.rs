//! Deadline urgency bucketing and most-urgent selection.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Urgency bucket for a deadline-bearing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueToday,
    DueTomorrow,
    DueWeek,
    DueLater,
    None,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::DueTomorrow => "due_tomorrow",
            Self::DueWeek => "due_week",
            Self::DueLater => "due_later",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The most urgent pick with its advisory message.
#[derive(Debug, Clone)]
pub struct DeadlinePick<'a> {
    pub task: Option<&'a Task>,
    pub message: String,
    pub urgency: Urgency,
}

impl<'a> DeadlinePick<'a> {
    fn none(message: &str) -> Self {
        Self {
            task: None,
            message: message.to_string(),
            urgency: Urgency::None,
        }
    }
}

fn bucket_for(days_until: i64) -> Urgency {
    if days_until < 0 {
        Urgency::Overdue
    } else if days_until == 0 {
        Urgency::DueToday
    } else if days_until == 1 {
        Urgency::DueTomorrow
    } else if days_until <= 7 {
        Urgency::DueWeek
    } else {
        Urgency::DueLater
    }
}

fn message_for(urgency: Urgency, days_until: i64) -> String {
    match urgency {
        Urgency::Overdue => format!(
            "This task is {} days OVERDUE! You should complete it immediately.",
            days_until.abs()
        ),
        Urgency::DueToday => "This task is DUE TODAY! Complete it now.".to_string(),
        Urgency::DueTomorrow => "This task is due TOMORROW. Consider starting it today.".to_string(),
        Urgency::DueWeek => format!("This task is due in {} days. Plan accordingly.", days_until),
        Urgency::DueLater => format!("This task is due in {} days.", days_until),
        Urgency::None => String::new(),
    }
}

/// Select the single most urgent deadline-bearing task.
///
/// Tasks are bucketed by days until due (relative to `today`, on calendar
/// dates); the first non-empty bucket wins, with ties broken by the
/// largest overdue magnitude or the soonest due date. Unparsable
/// deadlines are skipped.
pub fn most_urgent<'a>(tasks: &'a [Task], today: NaiveDate) -> DeadlinePick<'a> {
    if tasks.is_empty() {
        return DeadlinePick::none("No tasks with deadlines found");
    }

    let mut dated: Vec<(&Task, i64)> = tasks
        .iter()
        .filter(|t| t.deadline.is_some())
        .filter_map(|t| t.deadline_date().map(|d| (t, (d - today).num_days())))
        .collect();

    if dated.is_empty() {
        return DeadlinePick::none("No tasks have deadlines set");
    }

    // Most overdue first, then soonest due; bucket order falls out of the
    // same ascending sort.
    dated.sort_by_key(|&(_, days)| days);

    let (task, days_until) = dated[0];
    let urgency = bucket_for(days_until);
    DeadlinePick {
        task: Some(task),
        message: message_for(urgency, days_until),
        urgency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::task::TaskCategory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn dated_task(name: &str, deadline: &str) -> Task {
        Task::new(name, 5, TaskCategory::TodoMust, 30, vec![Emotion::Neutral])
            .with_deadline(deadline)
    }

    #[test]
    fn empty_pool() {
        let pick = most_urgent(&[], today());
        assert!(pick.task.is_none());
        assert_eq!(pick.message, "No tasks with deadlines found");
        assert_eq!(pick.urgency, Urgency::None);
        assert_eq!(pick.urgency.to_string(), "none");
    }

    #[test]
    fn no_deadlines_set() {
        let tasks = vec![Task::new(
            "Chores",
            5,
            TaskCategory::Life,
            30,
            vec![Emotion::Neutral],
        )];
        let pick = most_urgent(&tasks, today());
        assert!(pick.task.is_none());
        assert_eq!(pick.message, "No tasks have deadlines set");
    }

    #[test]
    fn overdue_task_wins_with_warning() {
        let tasks = vec![
            dated_task("Essay", "2025-03-10"),
            dated_task("Taxes", "2025-03-03"), // yesterday
        ];
        let pick = most_urgent(&tasks, today());
        assert_eq!(pick.task.unwrap().name, "Taxes");
        assert_eq!(pick.urgency, Urgency::Overdue);
        assert!(pick.message.contains("OVERDUE"));
    }

    #[test]
    fn most_overdue_breaks_overdue_ties() {
        let tasks = vec![
            dated_task("A", "2025-03-03"),
            dated_task("B", "2025-02-20"),
        ];
        let pick = most_urgent(&tasks, today());
        assert_eq!(pick.task.unwrap().name, "B");
        assert!(pick.message.starts_with("This task is 12 days OVERDUE"));
    }

    #[test]
    fn bucket_priority_order() {
        let tasks = vec![
            dated_task("Later", "2025-04-20"),
            dated_task("Week", "2025-03-09"),
            dated_task("Tomorrow", "2025-03-05"),
        ];
        let pick = most_urgent(&tasks, today());
        assert_eq!(pick.task.unwrap().name, "Tomorrow");
        assert_eq!(pick.urgency, Urgency::DueTomorrow);

        let due_today = vec![dated_task("Now", "2025-03-04")];
        let pick = most_urgent(&due_today, today());
        assert_eq!(pick.urgency, Urgency::DueToday);
        assert!(pick.message.contains("DUE TODAY"));
    }

    #[test]
    fn unparsable_deadlines_are_skipped() {
        let tasks = vec![dated_task("Bad", "someday"), dated_task("Good", "2025-03-06")];
        let pick = most_urgent(&tasks, today());
        assert_eq!(pick.task.unwrap().name, "Good");
        assert_eq!(pick.urgency, Urgency::DueWeek);

        let all_bad = vec![dated_task("Bad", "someday")];
        let pick = most_urgent(&all_bad, today());
        assert!(pick.task.is_none());
    }
}
