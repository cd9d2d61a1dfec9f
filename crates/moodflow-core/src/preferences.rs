//! Preference ranking engine.
//!
//! Hard-filters a pool against resources, time windows, and emotion,
//! recording a reason for every exclusion; scores the survivors'
//! flexibility (an MRV-like measure) and mutual constraint pressure (a
//! degree-like measure); then ranks them by a weighted fitness of time,
//! resource, and emotion suitability. Manually authored preferences get a
//! flat bonus so they dominate discovered entries.

use chrono::Timelike;

use crate::conditions::Conditions;
use crate::emotion::Emotion;
use crate::task::{AllowedTime, Requires, Task, TaskCategory, TaskConstraints, TaskType};

/// Weight on inverted flexibility when both heuristics are enabled.
const MRV_WEIGHT: f64 = 0.6;
/// Weight on the degree measure when both heuristics are enabled.
const DEGREE_WEIGHT: f64 = 0.4;
/// Flat fitness bonus for manually authored preference entries.
const PREFERENCE_BONUS: f64 = 30.0;

/// A surviving candidate with its per-call heuristic and fitness scores.
#[derive(Debug, Clone)]
pub struct RankedPreference<'a> {
    pub task: &'a Task,
    /// Flexibility total: wider time windows, fewer required resources,
    /// and a broader emotion fit all raise it.
    pub mrv_score: f64,
    /// Shared-constraint count against the other surviving candidates.
    pub degree_score: f64,
    /// Combined ordering score when both heuristics are enabled.
    pub heuristic_score: f64,
    /// Weighted time/resource/emotion fitness plus the preference bonus.
    pub fitness: f64,
}

/// Output of the ranking engine: candidates in final order plus a reason
/// string for every excluded task.
#[derive(Debug, Clone, Default)]
pub struct PreferenceRanking<'a> {
    pub ranked: Vec<RankedPreference<'a>>,
    pub excluded: Vec<String>,
}

fn passes_time(task: &Task, hour: u32) -> bool {
    if let Some(window) = &task.constraints.allowed_time {
        if !window.contains_hour(hour) {
            return false;
        }
    }
    task.constraints.preferred_time.contains_hour(hour)
}

fn passes_resources(task: &Task, ctx: &Conditions) -> bool {
    match &task.constraints.requires {
        Some(requires) => requires.names().iter().all(|r| ctx.has_resource(r)),
        None => true,
    }
}

/// Flexibility of a single task: allowed-window width, resource slack
/// (10 minus the list length, or 9 for a single scalar requirement), and
/// the size of the emotion fit.
fn flexibility(task: &Task) -> f64 {
    let time_flexibility = task
        .constraints
        .allowed_time
        .as_ref()
        .map_or(0.0, AllowedTime::width);
    let resource_flexibility = match &task.constraints.requires {
        Some(Requires::Many(items)) => 10.0 - items.len() as f64,
        Some(Requires::One(_)) => 9.0,
        None => 0.0,
    };
    let emotion_flexibility = task.emotion_fit.len() as f64;
    time_flexibility + resource_flexibility + emotion_flexibility
}

/// Constraint coupling between two surviving candidates: +1 for
/// overlapping allowed-time windows, the intersection size for two
/// resource lists, +1 for identical scalar requirements.
fn shared_constraints(task: &Task, other: &Task) -> f64 {
    let mut degree = 0.0;

    if let (Some(a), Some(b)) = (&task.constraints.allowed_time, &other.constraints.allowed_time) {
        if a.overlaps(b) {
            degree += 1.0;
        }
    }

    match (&task.constraints.requires, &other.constraints.requires) {
        (Some(Requires::Many(a)), Some(Requires::Many(b))) => {
            degree += a.iter().filter(|item| b.contains(item)).count() as f64;
        }
        (Some(Requires::One(a)), Some(Requires::One(b))) if a == b => {
            degree += 1.0;
        }
        _ => {}
    }

    degree
}

fn fitness(task: &Task, ctx: &Conditions, hour: u32) -> f64 {
    let mut fitness = 0.0;

    // Time fitness: closeness to the window's optimal hour.
    if let Some(window) = &task.constraints.allowed_time {
        let distance = (hour as f64 - window.optimal_hour()).abs();
        fitness += (10.0 - distance).max(0.0) * 0.4;
    }

    // Resource fitness: fraction of required resources available.
    if let Some(requires) = &task.constraints.requires {
        let resource_fitness = match requires {
            Requires::Many(items) => {
                let available = items.iter().filter(|r| ctx.has_resource(r)).count();
                available as f64 / items.len().max(1) as f64 * 10.0
            }
            Requires::One(item) => {
                if ctx.has_resource(item) {
                    10.0
                } else {
                    0.0
                }
            }
        };
        fitness += resource_fitness * 0.3;
    }

    // Emotion fitness: exact match versus tolerated.
    let emotion_fitness = if task.suits(ctx.current_emotion) {
        10.0
    } else {
        5.0
    };
    fitness += emotion_fitness * 0.3;

    if task.is_preference {
        fitness += PREFERENCE_BONUS;
    }

    fitness
}

/// Hard-filter, heuristically order, and fitness-rank a preference pool.
///
/// `use_mrv` and `use_degree` toggle the flexibility and degree
/// heuristics; with both enabled the intermediate order favors
/// inflexible, highly coupled tasks (the ones hardest to place later).
/// The final order is by fitness, descending.
pub fn rank_preferences<'a>(
    tasks: &'a [Task],
    ctx: &Conditions,
    use_mrv: bool,
    use_degree: bool,
) -> PreferenceRanking<'a> {
    let hour = ctx.current_time.hour();

    let mut valid: Vec<&Task> = Vec::new();
    let mut excluded = Vec::new();
    for task in tasks {
        let resource_ok = passes_resources(task, ctx);
        let time_ok = passes_time(task, hour);
        let emotion_ok = task.suits(ctx.current_emotion);

        if resource_ok && time_ok && emotion_ok {
            valid.push(task);
            continue;
        }

        let mut reasons = Vec::new();
        if !resource_ok {
            reasons.push("resource constraint".to_string());
        }
        if !time_ok {
            reasons.push("time constraint".to_string());
        }
        if !emotion_ok {
            reasons.push(format!("emotion mismatch ({})", ctx.current_emotion));
        }
        excluded.push(format!("{}: {}", task.name, reasons.join(", ")));
    }

    let mut candidates: Vec<RankedPreference<'a>> = valid
        .iter()
        .enumerate()
        .map(|(i, &task)| {
            let mrv_score = if use_mrv { flexibility(task) } else { 0.0 };
            let degree_score = if use_degree {
                valid
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| shared_constraints(task, other))
                    .sum()
            } else {
                0.0
            };
            RankedPreference {
                task,
                mrv_score,
                degree_score,
                heuristic_score: 0.0,
                fitness: 0.0,
            }
        })
        .collect();

    if use_mrv && use_degree {
        for candidate in &mut candidates {
            candidate.heuristic_score =
                MRV_WEIGHT * (10.0 - candidate.mrv_score) + DEGREE_WEIGHT * candidate.degree_score;
        }
        candidates.sort_by(|a, b| b.heuristic_score.total_cmp(&a.heuristic_score));
    } else if use_mrv {
        candidates.sort_by(|a, b| a.mrv_score.total_cmp(&b.mrv_score));
    } else if use_degree {
        candidates.sort_by(|a, b| b.degree_score.total_cmp(&a.degree_score));
    }

    for candidate in &mut candidates {
        candidate.fitness = fitness(candidate.task, ctx, hour);
    }
    candidates.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    PreferenceRanking {
        ranked: candidates,
        excluded,
    }
}

/// Build a manually authored preference task: user-preference category,
/// preference type, 30-minute default duration, and the ranking bonus
/// flag set.
pub fn preference_task(
    name: impl Into<String>,
    emotions: Vec<Emotion>,
    window: (u32, u32),
    resources: Vec<String>,
    base_priority: u8,
) -> Task {
    let mut constraints = TaskConstraints {
        allowed_time: Some(AllowedTime::new(window.0, window.1)),
        ..TaskConstraints::default()
    };
    if !resources.is_empty() {
        constraints.requires = Some(Requires::Many(resources));
    }

    let mut task = Task::new(name, base_priority, TaskCategory::UserPreference, 30, emotions)
        .with_task_type(TaskType::Preference)
        .with_constraints(constraints);
    task.is_preference = true;
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn pool() -> Vec<Task> {
        vec![
            preference_task(
                "Guitar practice",
                vec![Emotion::Neutral, Emotion::Happy],
                (9, 21),
                vec!["guitar".to_string()],
                6,
            ),
            preference_task(
                "Evening run",
                vec![Emotion::Neutral],
                (17, 21),
                vec!["outdoors".to_string()],
                5,
            ),
            preference_task(
                "Call family",
                vec![Emotion::Sad, Emotion::Neutral],
                (9, 21),
                vec!["phone".to_string()],
                4,
            ),
        ]
    }

    #[test]
    fn excluded_tasks_carry_reasons() {
        let tasks = pool();
        let ctx = Conditions::new(at(10)).with_resources(["guitar", "phone"]);
        let ranking = rank_preferences(&tasks, &ctx, true, true);

        assert_eq!(ranking.ranked.len(), 2);
        assert_eq!(ranking.excluded.len(), 1);
        // Evening run fails both the resource and window checks at 10:00.
        assert!(ranking.excluded[0].starts_with("Evening run:"));
        assert!(ranking.excluded[0].contains("resource constraint"));
        assert!(ranking.excluded[0].contains("time constraint"));
    }

    #[test]
    fn emotion_mismatch_reason_names_the_emotion() {
        let tasks = vec![preference_task(
            "Journal",
            vec![Emotion::Sad],
            (0, 24),
            vec![],
            5,
        )];
        let ctx = Conditions::new(at(10)).with_emotion(Emotion::Happy);
        let ranking = rank_preferences(&tasks, &ctx, true, true);
        assert!(ranking.ranked.is_empty());
        assert_eq!(ranking.excluded, vec!["Journal: emotion mismatch (happy)"]);
    }

    #[test]
    fn manual_preferences_dominate_discovered_tasks() {
        let mut tasks = pool();
        // A discovered (non-preference) task that otherwise fits perfectly.
        let mut discovered = Task::new(
            "Browse news",
            9,
            TaskCategory::Personal,
            10,
            vec![Emotion::Neutral],
        );
        discovered.constraints.allowed_time = Some(AllowedTime::new(0, 24));
        tasks.push(discovered);

        let ctx = Conditions::new(at(10)).with_resources(["guitar", "phone"]);
        let ranking = rank_preferences(&tasks, &ctx, true, true);
        assert!(ranking.ranked[0].task.is_preference);
        assert_eq!(
            ranking.ranked.last().unwrap().task.name,
            "Browse news"
        );
    }

    #[test]
    fn flexibility_and_degree_scores() {
        let tasks = pool();
        let ctx = Conditions::new(at(10)).with_resources(["guitar", "phone"]);
        let ranking = rank_preferences(&tasks, &ctx, true, true);

        let guitar = ranking
            .ranked
            .iter()
            .find(|c| c.task.name == "Guitar practice")
            .unwrap();
        // Window width 12 + single-item list (10 - 1) + two emotions.
        assert_eq!(guitar.mrv_score, 12.0 + 9.0 + 2.0);
        // Overlapping window with "Call family", no shared resources.
        assert_eq!(guitar.degree_score, 1.0);
    }

    #[test]
    fn mrv_only_sorts_ascending_by_flexibility() {
        let tasks = pool();
        let ctx = Conditions::new(at(18)).with_resources(["guitar", "phone", "outdoors"]);
        let ranking = rank_preferences(&tasks, &ctx, true, false);
        // Final order is by fitness; the mrv_score fields are still
        // populated for every survivor.
        assert!(ranking.ranked.iter().all(|c| c.mrv_score > 0.0));
        assert!(ranking.ranked.iter().all(|c| c.degree_score == 0.0));
    }

    #[test]
    fn fitness_rewards_window_midpoint() {
        let tasks = vec![
            preference_task("Near", vec![Emotion::Neutral], (9, 13), vec![], 5),
            preference_task("Far", vec![Emotion::Neutral], (4, 24), vec![], 5),
        ];
        let ctx = Conditions::new(at(11));
        let ranking = rank_preferences(&tasks, &ctx, true, true);
        // 11:00 is the midpoint of [9, 13) but 3 hours from 14.
        assert_eq!(ranking.ranked[0].task.name, "Near");
        assert!(ranking.ranked[0].fitness > ranking.ranked[1].fitness);
    }

    #[test]
    fn empty_pool_yields_empty_ranking() {
        let ctx = Conditions::new(at(10));
        let ranking = rank_preferences(&[], &ctx, true, true);
        assert!(ranking.ranked.is_empty());
        assert!(ranking.excluded.is_empty());
    }
}
