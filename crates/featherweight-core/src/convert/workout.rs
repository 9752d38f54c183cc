use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    enum_from_name, enum_name, from_optional_timestamp, from_timestamp, to_optional_timestamp,
    to_timestamp, RemoteConvert,
};
use crate::models::{ExerciseLog, SetLog, Workout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWorkout {
    pub id: String,
    pub user_id: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub programme_id: Option<String>,
    #[serde(default)]
    pub programme_workout_id: Option<String>,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default)]
    pub day_number: Option<u32>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for Workout {
    type Remote = RemoteWorkout;

    fn to_remote(&self) -> RemoteWorkout {
        RemoteWorkout {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            date: to_timestamp(self.date),
            name: self.name.clone(),
            notes: self.notes.clone(),
            status: enum_name(&self.status),
            programme_id: self.programme_id.clone(),
            programme_workout_id: self.programme_workout_id.clone(),
            week_number: self.week_number,
            day_number: self.day_number,
            duration_seconds: self.duration_seconds,
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteWorkout) -> Self {
        Self {
            status: enum_from_name(&remote.status, "status"),
            id: remote.id,
            user_id: remote.user_id,
            date: from_timestamp(remote.date),
            name: remote.name,
            notes: remote.notes,
            programme_id: remote.programme_id,
            programme_workout_id: remote.programme_workout_id,
            week_number: remote.week_number,
            day_number: remote.day_number,
            duration_seconds: remote.duration_seconds,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExerciseLog {
    pub id: String,
    pub user_id: Option<String>,
    pub workout_id: String,
    pub exercise_variation_id: String,
    pub exercise_order: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub original_variation_id: Option<String>,
    #[serde(default)]
    pub is_swapped: bool,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for ExerciseLog {
    type Remote = RemoteExerciseLog;

    fn to_remote(&self) -> RemoteExerciseLog {
        RemoteExerciseLog {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            workout_id: self.workout_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            exercise_order: self.exercise_order,
            notes: self.notes.clone(),
            original_variation_id: self.original_exercise_id.clone(),
            is_swapped: self.is_swapped(),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteExerciseLog) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            workout_id: remote.workout_id,
            exercise_id: remote.exercise_variation_id,
            exercise_order: remote.exercise_order,
            notes: remote.notes,
            original_exercise_id: remote.original_variation_id,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSetLog {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_log_id: String,
    pub set_order: u32,
    #[serde(default)]
    pub target_reps: Option<u32>,
    #[serde(default)]
    pub target_weight: Option<f32>,
    pub actual_reps: u32,
    pub actual_weight: f32,
    #[serde(default)]
    pub actual_rpe: Option<f32>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl RemoteConvert for SetLog {
    type Remote = RemoteSetLog;

    fn to_remote(&self) -> RemoteSetLog {
        RemoteSetLog {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_log_id: self.exercise_log_id.clone(),
            set_order: self.set_order,
            target_reps: self.target_reps,
            target_weight: self.target_weight,
            actual_reps: self.actual_reps,
            actual_weight: self.actual_weight,
            actual_rpe: self.actual_rpe,
            is_completed: self.is_completed,
            completed_at: to_optional_timestamp(self.completed_at),
        }
    }

    fn from_remote(remote: RemoteSetLog) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            exercise_log_id: remote.exercise_log_id,
            set_order: remote.set_order,
            target_reps: remote.target_reps,
            target_weight: remote.target_weight,
            actual_reps: remote.actual_reps,
            actual_weight: remote.actual_weight,
            actual_rpe: remote.actual_rpe,
            is_completed: remote.is_completed,
            completed_at: from_optional_timestamp(remote.completed_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn workout_survives_remote_roundtrip() {
        let mut workout = Workout::new("user-1", "Legs");
        workout.status = WorkoutStatus::Completed;
        workout.duration_seconds = Some(3_600);

        assert_eq!(Workout::from_remote(workout.to_remote()), workout);
    }

    #[test]
    fn exercise_log_maps_variation_field_names() {
        let mut log = ExerciseLog::new("user-1", "w1", "squat", 2);
        log.original_exercise_id = Some("front-squat".to_string());

        let remote = log.to_remote();
        assert_eq!(remote.exercise_variation_id, "squat");
        assert!(remote.is_swapped);
        assert_eq!(ExerciseLog::from_remote(remote), log);
    }

    #[test]
    fn set_log_survives_remote_roundtrip() {
        let mut set = SetLog::completed("user-1", "log-1", 0, 102.5, 5);
        set.actual_rpe = Some(8.5);

        assert_eq!(SetLog::from_remote(set.to_remote()), set);
    }
}
