//! Built-in mood-lifting tasks.
//!
//! A small catalogue collaborators can fall back on when the user has not
//! provided any mood-changing activities of their own.

use crate::emotion::Emotion;
use crate::task::{Requires, Task, TaskCategory, TaskConstraints, TaskType};

fn mood_task(
    name: &str,
    base_priority: u8,
    duration: u32,
    emotion_fit: Vec<Emotion>,
    requires: Option<&str>,
    max_time: u32,
    energy_required: u8,
) -> Task {
    let constraints = TaskConstraints {
        requires: requires.map(|r| Requires::One(r.to_string())),
        max_time: Some(max_time),
        energy_required,
        ..TaskConstraints::default()
    };
    Task::new(
        name,
        base_priority,
        TaskCategory::MoodEnhancer,
        duration,
        emotion_fit,
    )
    .with_task_type(TaskType::MoodChanger)
    .with_constraints(constraints)
}

/// The default mood-changer catalogue.
pub fn default_mood_tasks() -> Vec<Task> {
    use Emotion::{Angry, Fear, Neutral, Sad};

    let mut walk = mood_task(
        "Take a short walk",
        7,
        20,
        vec![Sad, Angry, Fear],
        Some("outdoors"),
        30,
        5,
    );
    walk.constraints.preferred_time = crate::task::PreferredTime::Daylight;

    vec![
        mood_task(
            "Listen to uplifting music",
            6,
            15,
            vec![Sad, Angry, Fear],
            Some("headphones"),
            30,
            3,
        ),
        walk,
        mood_task(
            "Watch funny videos",
            5,
            10,
            vec![Sad, Angry],
            Some("internet"),
            20,
            2,
        ),
        mood_task(
            "Deep breathing exercise",
            8,
            5,
            vec![Angry, Fear, Sad],
            None,
            10,
            1,
        ),
        mood_task(
            "Drink water and stretch",
            6,
            5,
            vec![Sad, Neutral],
            Some("water"),
            10,
            2,
        ),
    ]
}
