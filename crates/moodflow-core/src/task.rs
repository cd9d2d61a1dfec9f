//! Task entity and the scoring model every selection strategy consumes.
//!
//! A [`Task`] is constructed fully populated by external collaborators
//! (data entry, defaults, session reload). The engine reads its static
//! attributes, computes per-call scores, and only writes back the
//! success-tracking fields through [`Task::mark_attempted`]. Per-call
//! scores are returned as values, never stored on the entity, so two
//! decision cycles cannot observe each other's scoring.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::conditions::Conditions;
use crate::emotion::Emotion;

/// How a task entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Mandatory task; high-priority must-dos bypass the emotion gate.
    MustDo,
    /// Activity intended to improve mood.
    MoodChanger,
    /// Manually authored user preference.
    Preference,
    #[default]
    General,
}

/// Category of a task, used for emotion-transition prediction and
/// fallback sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Academic,
    Work,
    Break,
    Personal,
    Life,
    MoodEnhancer,
    UserPreference,
    TodoMust,
    Planning,
}

impl TaskCategory {
    /// Categories expected to lift a negative mood.
    pub fn is_mood_lifting(self) -> bool {
        matches!(
            self,
            Self::Break | Self::Personal | Self::Life | Self::MoodEnhancer | Self::UserPreference
        )
    }

    /// Categories that consume focus.
    pub fn is_productive(self) -> bool {
        matches!(self, Self::Academic | Self::Work | Self::TodoMust)
    }
}

/// A resource requirement: a single item or a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requires {
    One(String),
    Many(Vec<String>),
}

impl Requires {
    /// Every named resource, regardless of shape.
    pub fn names(&self) -> &[String] {
        match self {
            Requires::One(name) => std::slice::from_ref(name),
            Requires::Many(names) => names,
        }
    }
}

/// Named time-of-day window a task can prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    Daylight,
    Night,
    #[default]
    Any,
}

impl PreferredTime {
    /// Whether `hour` (0-23) falls inside the named window.
    pub fn contains_hour(self, hour: u32) -> bool {
        match self {
            Self::Morning => (6..12).contains(&hour),
            Self::Afternoon => (12..17).contains(&hour),
            Self::Evening => (17..22).contains(&hour),
            Self::Daylight => (7..18).contains(&hour),
            Self::Night => hour >= 19 || hour < 5,
            Self::Any => true,
        }
    }
}

/// Explicit allowed-time window in whole hours, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllowedTime {
    pub start: u32,
    pub end: u32,
    /// Optimal hour inside the window; the midpoint when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal: Option<f64>,
}

impl AllowedTime {
    /// Window covering `[start, end)` with the midpoint as optimal hour.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            optimal: None,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }

    /// Window width in hours; 0 for degenerate windows.
    pub fn width(&self) -> f64 {
        (self.end as f64 - self.start as f64).max(0.0)
    }

    pub fn optimal_hour(&self) -> f64 {
        self.optimal
            .unwrap_or((self.start as f64 + self.end as f64) / 2.0)
    }

    pub fn overlaps(&self, other: &AllowedTime) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

/// Hard time-of-day and weekday flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeFlags {
    #[serde(default)]
    pub morning_only: bool,
    #[serde(default)]
    pub evening_only: bool,
    #[serde(default)]
    pub office_hours: bool,
    #[serde(default)]
    pub weekends_only: bool,
}

/// Constraint parameters attached to a task.
///
/// Missing keys default to permissive values: no required resources, no
/// time window, no duration budget, no calendar gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConstraints {
    /// Resources that must all be present in the caller's conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Requires>,
    /// Explicit allowed-time window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_time: Option<AllowedTime>,
    /// Named preferred window; rewarded by scoring, enforced only by the
    /// preference ranking engine.
    #[serde(default)]
    pub preferred_time: PreferredTime,
    /// Maximum acceptable duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u32>,
    /// Energy this task demands on a 1-10 scale.
    #[serde(default = "default_energy_required")]
    pub energy_required: u8,
    /// Hard time flags checked by the strict time predicate.
    #[serde(default)]
    pub time_flags: TimeFlags,
    /// Calendar gate (`YYYY-MM-DD`): the task is unavailable before this
    /// date. Unparsable values are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

fn default_energy_required() -> u8 {
    5
}

impl Default for TaskConstraints {
    fn default() -> Self {
        Self {
            requires: None,
            allowed_time: None,
            preferred_time: PreferredTime::Any,
            max_time: None,
            energy_required: default_energy_required(),
            time_flags: TimeFlags::default(),
            start_date: None,
        }
    }
}

fn default_success_rate() -> f64 {
    1.0
}

/// The central entity: one activity the engine can recommend.
///
/// `name` is the identity key across the engine; two tasks with the same
/// name are treated as duplicates by deduplication and sequence search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Importance on a 1-10 scale.
    pub base_priority: u8,
    pub category: TaskCategory,
    /// Estimated duration in minutes, always > 0.
    pub duration: u32,
    /// Emotional states this task suits. Never empty; callers normalize
    /// labels and fall back to neutral before constructing the task.
    pub emotion_fit: Vec<Emotion>,
    /// Optional `YYYY-MM-DD` deadline. Unparsable values contribute zero
    /// urgency and are skipped by the deadline selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub constraints: TaskConstraints,
    /// Marks manually authored preference entries, which receive a flat
    /// bonus in preference ranking.
    #[serde(default)]
    pub is_preference: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempted: Option<NaiveDateTime>,
    /// Rolling success rate, clamped to [0.1, 1.0].
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

impl Task {
    /// Create a task with permissive constraints. Priority is clamped to
    /// 1-10, duration to at least one minute, and an empty emotion fit
    /// falls back to neutral.
    pub fn new(
        name: impl Into<String>,
        base_priority: u8,
        category: TaskCategory,
        duration: u32,
        emotion_fit: Vec<Emotion>,
    ) -> Self {
        Self {
            name: name.into(),
            base_priority: base_priority.clamp(1, 10),
            category,
            duration: duration.max(1),
            emotion_fit: if emotion_fit.is_empty() {
                vec![Emotion::Neutral]
            } else {
                emotion_fit
            },
            deadline: None,
            task_type: TaskType::General,
            constraints: TaskConstraints::default(),
            is_preference: false,
            completed: false,
            attempt_count: 0,
            last_attempted: None,
            success_rate: default_success_rate(),
        }
    }

    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_constraints(mut self, constraints: TaskConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Whether the given emotion appears in this task's fit set.
    pub fn suits(&self, emotion: Emotion) -> bool {
        self.emotion_fit.contains(&emotion)
    }

    /// Compute the context-dependent fitness score.
    ///
    /// Combines base priority, an emotion-match term (+8/-4), a task-type
    /// term (+5 must-do, +3 mood-changer), time suitability, energy match,
    /// success history, and caller-supplied bonuses. Deadline urgency is
    /// not sampled here; callers add [`Task::urgency_bonus`] explicitly via
    /// `urgency_bonus` when they want it. The result is floored at 0.1 so
    /// scores are always strictly positive.
    pub fn compute_score(
        &self,
        emotion: Emotion,
        now: NaiveDateTime,
        energy: u8,
        preference_bonus: f64,
        urgency_bonus: f64,
    ) -> f64 {
        let emotion_term = if self.suits(emotion) { 8.0 } else { -4.0 };
        let type_term = match self.task_type {
            TaskType::MustDo => 5.0,
            TaskType::MoodChanger => 3.0,
            _ => 0.0,
        };
        let time_term = self.time_suitability(now);
        let energy_gap = (self.constraints.energy_required as f64 - energy as f64).abs();
        let energy_term = (5.0 - energy_gap).max(0.0);
        let success_term = self.success_rate * 3.0;

        let score = self.base_priority as f64
            + emotion_term
            + type_term
            + time_term
            + energy_term
            + success_term
            + preference_bonus
            + urgency_bonus;

        score.max(0.1)
    }

    /// Convenience wrapper scoring under a full conditions record.
    pub fn score_under(&self, ctx: &Conditions) -> f64 {
        self.compute_score(
            ctx.current_emotion,
            ctx.current_time,
            ctx.current_energy,
            ctx.preference_bonus,
            ctx.urgency_bonus,
        )
    }

    /// Graded time suitability: penalties for violated hard flags, a bonus
    /// for hitting the preferred window, +1 for "any".
    pub fn time_suitability(&self, now: NaiveDateTime) -> f64 {
        let hour = now.hour();
        let flags = self.constraints.time_flags;

        if flags.morning_only && hour >= 12 {
            return -5.0;
        }
        if flags.evening_only && hour < 17 {
            return -5.0;
        }
        if flags.office_hours && !(9..17).contains(&hour) {
            return -3.0;
        }

        match self.constraints.preferred_time {
            PreferredTime::Any => 1.0,
            preferred if preferred.contains_hour(hour) => 3.0,
            _ => 0.0,
        }
    }

    /// Hard pass/fail time check used by the strict filter and the solver.
    pub fn is_time_suitable(&self, now: NaiveDateTime) -> bool {
        let hour = now.hour();
        let flags = self.constraints.time_flags;

        if flags.morning_only && hour >= 12 {
            return false;
        }
        if flags.evening_only && hour < 17 {
            return false;
        }
        if flags.office_hours && !(9..17).contains(&hour) {
            return false;
        }
        if flags.weekends_only && now.weekday().num_days_from_monday() < 5 {
            return false;
        }
        true
    }

    /// Resource and calendar gating: the calendar gate must be open, every
    /// required resource present, and the duration within the max-time
    /// budget.
    pub fn resources_available(&self, ctx: &Conditions) -> bool {
        if let Some(gate) = self.constraints.start_date.as_deref() {
            if let Ok(start) = NaiveDate::parse_from_str(gate, "%Y-%m-%d") {
                if ctx.current_time.date() < start {
                    return false;
                }
            }
        }

        if let Some(requires) = &self.constraints.requires {
            if !requires.names().iter().all(|r| ctx.has_resource(r)) {
                return false;
            }
        }

        if let Some(max_time) = self.constraints.max_time {
            if self.duration > max_time {
                return false;
            }
        }

        true
    }

    /// Parsed deadline, if present and well formed.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Deadline-proximity bonus relative to `today`: overdue 10, due today
    /// 8, within two days 5, within a week 2, otherwise 0. Absent or
    /// unparsable deadlines contribute 0.
    pub fn urgency_bonus(&self, today: NaiveDate) -> f64 {
        let Some(deadline) = self.deadline_date() else {
            return 0.0;
        };
        let days_until = (deadline - today).num_days();
        if days_until < 0 {
            10.0
        } else if days_until == 0 {
            8.0
        } else if days_until <= 2 {
            5.0
        } else if days_until <= 7 {
            2.0
        } else {
            0.0
        }
    }

    /// Record an attempt and nudge the rolling success rate: +0.1 on
    /// success, -0.2 on failure, clamped to [0.1, 1.0].
    pub fn mark_attempted(&mut self, now: NaiveDateTime, successful: bool) {
        self.attempt_count += 1;
        self.last_attempted = Some(now);

        if successful {
            self.completed = true;
            self.success_rate = (self.success_rate + 0.1).min(1.0);
        } else {
            self.success_rate = (self.success_rate - 0.2).max(0.1);
        }
    }
}
