//! Best-first sequence planning with emotion-transition prediction.
//!
//! Searches for a short ordered sequence of tasks, predicting how each
//! step shifts the emotional state before choosing the next one. Step
//! cost `g` comes from priority, emotion fit, and fatigue; the estimate
//! `h` inverts the scoring model under the predicted emotion, so a better
//! task looks like less remaining cost. The estimate is not admissible;
//! the search finds a good sequence, not a provably optimal one.
//!
//! Branching is the filtered pool size per step, so work grows roughly as
//! `pool_size ^ max_sequence_length`; callers with large pools should
//! bound one or the other.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::HashSet;

use chrono::Timelike;

use crate::conditions::Conditions;
use crate::emotion::Emotion;
use crate::filter;
use crate::strategy::best_of;
use crate::task::{Task, TaskCategory, TaskType};

/// Default number of steps in a planned sequence.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 3;

/// Predict the emotional state after completing a task.
///
/// Mood-lifting categories pull negative states toward neutral and good
/// states toward happy. Productive categories pull neutral or focused
/// states toward focused, and negative states toward tired. Anything else
/// settles a negative state to neutral and leaves the rest unchanged.
pub fn predict_next_emotion(task: &Task, emotion: Emotion) -> Emotion {
    if task.category.is_mood_lifting() {
        return if emotion.is_negative() {
            Emotion::Neutral
        } else if matches!(emotion, Emotion::Neutral | Emotion::Happy) {
            Emotion::Happy
        } else {
            emotion
        };
    }

    if task.category.is_productive() {
        return match emotion {
            Emotion::Neutral | Emotion::Focused => Emotion::Focused,
            Emotion::Sad | Emotion::Angry | Emotion::Tired => Emotion::Tired,
            other => other,
        };
    }

    match emotion {
        Emotion::Sad | Emotion::Angry | Emotion::Tired => Emotion::Neutral,
        other => other,
    }
}

/// Cost of taking a task while in the given emotional state.
fn step_cost(task: &Task, emotion: Emotion, ctx: &Conditions, is_first: bool) -> f64 {
    let mut cost = 10.0 - task.base_priority as f64;
    if !task.suits(emotion) {
        cost += 5.0;
    }
    cost += ctx.fatigue() * 0.5;
    if is_first {
        cost -= 2.0;
    }

    if task.task_type == TaskType::Preference {
        if task.suits(emotion) {
            cost -= 3.0;
        }
        if let Some(window) = &task.constraints.allowed_time {
            if !window.contains_hour(ctx.current_time.hour()) {
                cost += 5.0;
            }
        }
    }

    cost.max(0.0)
}

/// Estimated remaining cost: the scoring model under the predicted
/// emotion, inverted so a higher-quality task estimates lower.
fn estimated_remaining(task: &Task, predicted: Emotion, ctx: &Conditions) -> f64 {
    50.0 - task.compute_score(
        predicted,
        ctx.current_time,
        ctx.current_energy,
        0.0,
        0.0,
    )
}

struct Node {
    task: usize,
    emotion_after: Emotion,
    g: f64,
    h: f64,
    parent: Option<usize>,
    depth: usize,
}

impl Node {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Open-set entry ordered by lowest `f` first, with a creation sequence
/// number as a deterministic tie-break.
struct OpenEntry {
    f: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest f first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search for an ordered sequence of at most `max_sequence_length` tasks.
///
/// The candidate pool is the supplied tasks plus the user's preference
/// tasks, deduplicated by name and strictly filtered. When no sequence
/// of at least two steps exists, falls back to the greedy single pick
/// over the same pool; an empty pool yields an empty sequence.
pub fn plan_sequence<'a>(
    tasks: &'a [Task],
    user_preferences: &'a [Task],
    ctx: &Conditions,
    max_sequence_length: usize,
) -> Vec<&'a Task> {
    let mut pool: Vec<&'a Task> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for task in tasks.iter().chain(user_preferences) {
        if !filter::emotion_admissible(task, ctx.current_emotion) {
            continue;
        }
        if !filter::time_admissible(task, ctx) {
            continue;
        }
        if !filter::resource_admissible(task, ctx) {
            continue;
        }
        if seen.insert(task.name.as_str()) {
            pool.push(task);
        }
    }

    if pool.is_empty() || max_sequence_length == 0 {
        return Vec::new();
    }

    let mut arena: Vec<Node> = Vec::new();
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut next_seq = 0u64;

    for (i, task) in pool.iter().enumerate() {
        let g = step_cost(task, ctx.current_emotion, ctx, true);
        let emotion_after = predict_next_emotion(task, ctx.current_emotion);
        let h = estimated_remaining(task, emotion_after, ctx);
        arena.push(Node {
            task: i,
            emotion_after,
            g,
            h,
            parent: None,
            depth: 1,
        });
        open.push(OpenEntry {
            f: g + h,
            seq: next_seq,
            node: arena.len() - 1,
        });
        next_seq += 1;
    }

    let mut best: Option<(f64, usize)> = None;

    while let Some(entry) = open.pop() {
        let (depth, emotion_after, g) = {
            let node = &arena[entry.node];
            (node.depth, node.emotion_after, node.g)
        };

        if depth >= max_sequence_length {
            let f = arena[entry.node].f();
            if best.map_or(true, |(best_f, _)| f < best_f) {
                best = Some((f, entry.node));
            }
            continue;
        }

        // Tasks already on this chain are not revisited.
        let mut on_chain: Vec<usize> = Vec::new();
        let mut cursor = Some(entry.node);
        while let Some(idx) = cursor {
            on_chain.push(arena[idx].task);
            cursor = arena[idx].parent;
        }

        for (i, task) in pool.iter().enumerate() {
            if on_chain.contains(&i) {
                continue;
            }
            if !task.suits(emotion_after)
                && !(task.task_type == TaskType::MustDo && task.base_priority >= 7)
            {
                continue;
            }

            let g_new = g + step_cost(task, emotion_after, ctx, false);
            let next_emotion = predict_next_emotion(task, emotion_after);
            let h_new = estimated_remaining(task, next_emotion, ctx);
            arena.push(Node {
                task: i,
                emotion_after: next_emotion,
                g: g_new,
                h: h_new,
                parent: Some(entry.node),
                depth: depth + 1,
            });
            open.push(OpenEntry {
                f: g_new + h_new,
                seq: next_seq,
                node: arena.len() - 1,
            });
            next_seq += 1;
        }
    }

    if let Some((_, leaf)) = best {
        let mut sequence: Vec<&Task> = Vec::new();
        let mut cursor = Some(leaf);
        while let Some(idx) = cursor {
            sequence.push(pool[arena[idx].task]);
            cursor = arena[idx].parent;
        }
        sequence.reverse();
        if sequence.len() >= 2 {
            sequence.truncate(max_sequence_length);
            return sequence;
        }
    }

    // No viable multi-step sequence: fall back to the greedy single pick.
    best_of(&pool, ctx)
        .map(|candidate| vec![candidate.task])
        .unwrap_or_default()
}

/// Category-based fallback ordering used when search yields nothing
/// viable.
///
/// Negative states get one mood-lifting task followed by productive work;
/// neutral or positive states get productive work first, then preference
/// and mood-enhancer tasks. Remaining slots are filled by priority from
/// the emotion-matching pool (or the whole pool when nothing matches).
pub fn fallback_sequence<'a>(tasks: &'a [Task], emotion: Emotion, length: usize) -> Vec<&'a Task> {
    let mut matching: Vec<&Task> = tasks.iter().filter(|t| t.suits(emotion)).collect();
    if matching.is_empty() {
        matching = tasks.iter().collect();
    }

    let mut sequence: Vec<&Task> = Vec::new();

    if emotion.is_negative() {
        let mut mood: Vec<&Task> = matching
            .iter()
            .copied()
            .filter(|t| t.category.is_mood_lifting())
            .collect();
        // Highest priority first; shorter first on equal priority, to lift
        // mood quickly.
        mood.sort_by(|a, b| {
            b.base_priority
                .cmp(&a.base_priority)
                .then_with(|| a.duration.cmp(&b.duration))
        });
        sequence.extend(mood.into_iter().take(1));

        let mut work: Vec<&Task> = matching
            .iter()
            .copied()
            .filter(|t| t.category.is_productive())
            .collect();
        work.sort_by(|a, b| b.base_priority.cmp(&a.base_priority));
        let room = length.saturating_sub(sequence.len());
        sequence.extend(work.into_iter().take(room));
    } else {
        let mut productive: Vec<&Task> = matching
            .iter()
            .copied()
            .filter(|t| t.category.is_productive())
            .collect();
        productive.sort_by(|a, b| b.base_priority.cmp(&a.base_priority));
        sequence.extend(productive.into_iter().take(length.min(2)));

        let mut preferences: Vec<&Task> = matching
            .iter()
            .copied()
            .filter(|t| {
                matches!(
                    t.category,
                    TaskCategory::UserPreference | TaskCategory::MoodEnhancer
                )
            })
            .collect();
        preferences.sort_by(|a, b| b.base_priority.cmp(&a.base_priority));
        let room = length.saturating_sub(sequence.len());
        sequence.extend(preferences.into_iter().take(room));
    }

    if sequence.len() < length {
        let mut remaining: Vec<&Task> = matching
            .iter()
            .copied()
            .filter(|t| !sequence.iter().any(|s| s.name == t.name))
            .collect();
        remaining.sort_by(|a, b| b.base_priority.cmp(&a.base_priority));
        let room = length - sequence.len();
        sequence.extend(remaining.into_iter().take(room));
    }

    sequence.truncate(length);
    sequence
}
