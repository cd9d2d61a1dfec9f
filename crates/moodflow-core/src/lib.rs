//! # Moodflow Core Library
//!
//! This library is the decision engine behind Moodflow: given an in-memory
//! pool of tasks and the caller's current conditions (time, emotion,
//! available resources, energy), it recommends what to do next.
//!
//! ## Architecture
//!
//! - **Task & Scoring Model**: the shared entity and the weighted fitness
//!   function every strategy consumes
//! - **Strict Filter**: the hard emotion/time/resource admissibility gate
//! - **Eligibility Solver**: per-task recommend/skip search with MRV and
//!   degree-ordered backtracking
//! - **Selection Strategies**: greedy, hill climbing, and stochastic picks
//! - **Sequence Planner**: best-first search over predicted emotional states
//! - **Preference Ranking & Multi-Objective Optimizer**: ranked lists with
//!   explainable exclusions
//!
//! Everything is synchronous and operates on a pool supplied per decision
//! cycle; emotion capture, user interfaces, and persistence live in external
//! collaborators. The engine degrades gracefully on malformed input: empty
//! pools yield empty results, never errors.
//!
//! ## Key Components
//!
//! - [`Task`]: the central entity with its scoring model
//! - [`Conditions`]: the per-cycle context record
//! - [`EligibilitySolver`]: heuristic-ordered recommend/skip solver
//! - [`plan_sequence`]: multi-step sequence search

pub mod conditions;
pub mod deadline;
pub mod defaults;
pub mod emotion;
pub mod error;
pub mod filter;
pub mod optimize;
pub mod planner;
pub mod preferences;
pub mod solver;
pub mod strategy;
pub mod task;

pub use conditions::Conditions;
pub use deadline::{most_urgent, DeadlinePick, Urgency};
pub use emotion::Emotion;
pub use error::{CoreError, Result, ValidationError};
pub use filter::{apply_strict_constraints, diagnose, Exclusion};
pub use optimize::{ObjectiveWeights, RankedObjective};
pub use planner::{fallback_sequence, plan_sequence, predict_next_emotion};
pub use preferences::{preference_task, rank_preferences, PreferenceRanking, RankedPreference};
pub use solver::{solve_pool, EligibilitySolver, SolverOutcome};
pub use strategy::{greedy, hill_climbing, stochastic, ScoredCandidate};
pub use task::{
    AllowedTime, PreferredTime, Requires, Task, TaskCategory, TaskConstraints, TaskType, TimeFlags,
};
