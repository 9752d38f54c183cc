//! Workout logging models: workouts, exercise logs, set logs

use serde::{Deserialize, Serialize};

use super::new_entity_id;
use crate::util::unix_millis_now;

/// Lifecycle state of a logged workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A logged workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub user_id: Option<String>,
    /// Session date (Unix ms)
    pub date: i64,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub status: WorkoutStatus,
    pub programme_id: Option<String>,
    pub programme_workout_id: Option<String>,
    pub week_number: Option<u32>,
    pub day_number: Option<u32>,
    pub duration_seconds: Option<i64>,
    pub updated_at: i64,
}

impl Workout {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = unix_millis_now();
        Self {
            id: new_entity_id(),
            user_id: Some(user_id.into()),
            date: now,
            name: Some(name.into()),
            notes: None,
            status: WorkoutStatus::NotStarted,
            programme_id: None,
            programme_workout_id: None,
            week_number: None,
            day_number: None,
            duration_seconds: None,
            updated_at: now,
        }
    }
}

/// One exercise performed within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub id: String,
    pub user_id: Option<String>,
    pub workout_id: String,
    pub exercise_id: String,
    pub exercise_order: u32,
    pub notes: Option<String>,
    /// Exercise originally prescribed when this log was swapped
    pub original_exercise_id: Option<String>,
    pub updated_at: i64,
}

impl ExerciseLog {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        workout_id: impl Into<String>,
        exercise_id: impl Into<String>,
        exercise_order: u32,
    ) -> Self {
        Self {
            id: new_entity_id(),
            user_id: Some(user_id.into()),
            workout_id: workout_id.into(),
            exercise_id: exercise_id.into(),
            exercise_order,
            notes: None,
            original_exercise_id: None,
            updated_at: unix_millis_now(),
        }
    }

    #[must_use]
    pub const fn is_swapped(&self) -> bool {
        self.original_exercise_id.is_some()
    }
}

/// A single set within an exercise log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_log_id: String,
    pub set_order: u32,
    pub target_reps: Option<u32>,
    pub target_weight: Option<f32>,
    pub actual_reps: u32,
    pub actual_weight: f32,
    pub actual_rpe: Option<f32>,
    pub is_completed: bool,
    /// Completion time (Unix ms); doubles as the row's modification time
    pub completed_at: Option<i64>,
}

impl SetLog {
    #[must_use]
    pub fn completed(
        user_id: impl Into<String>,
        exercise_log_id: impl Into<String>,
        set_order: u32,
        actual_weight: f32,
        actual_reps: u32,
    ) -> Self {
        Self {
            id: new_entity_id(),
            user_id: Some(user_id.into()),
            exercise_log_id: exercise_log_id.into(),
            set_order,
            target_reps: None,
            target_weight: None,
            actual_reps,
            actual_weight,
            actual_rpe: None,
            is_completed: true,
            completed_at: Some(unix_millis_now()),
        }
    }
}
