use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    enum_from_name, enum_name, from_optional_timestamp, from_timestamp, to_optional_timestamp,
    to_timestamp, RemoteConvert,
};
use crate::models::{
    ExerciseMax, ExercisePerformance, ExerciseSwapHistory, ExerciseUsage, GlobalExerciseProgress,
    OneRmHistory, PersonalRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExerciseMax {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_variation_id: String,
    #[serde(rename = "oneRMEstimate")]
    pub one_rm_estimate: f32,
    #[serde(default, rename = "oneRMContext")]
    pub one_rm_context: Option<String>,
    #[serde(default, rename = "oneRMConfidence")]
    pub one_rm_confidence: f32,
    #[serde(default)]
    pub source: String,
    pub recorded_at: DateTime<Utc>,
}

impl RemoteConvert for ExerciseMax {
    type Remote = RemoteExerciseMax;

    fn to_remote(&self) -> RemoteExerciseMax {
        RemoteExerciseMax {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            one_rm_estimate: self.one_rm_estimate,
            one_rm_context: self.one_rm_context.clone(),
            one_rm_confidence: self.one_rm_confidence,
            source: enum_name(&self.source),
            recorded_at: to_timestamp(self.recorded_at),
        }
    }

    fn from_remote(remote: RemoteExerciseMax) -> Self {
        Self {
            source: enum_from_name(&remote.source, "source"),
            id: remote.id,
            user_id: remote.user_id,
            exercise_id: remote.exercise_variation_id,
            one_rm_estimate: remote.one_rm_estimate,
            one_rm_context: remote.one_rm_context,
            one_rm_confidence: remote.one_rm_confidence,
            recorded_at: from_timestamp(remote.recorded_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePersonalRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_variation_id: String,
    #[serde(default)]
    pub record_type: String,
    pub weight: f32,
    pub reps: u32,
    #[serde(default)]
    pub rpe: Option<f32>,
    #[serde(default, rename = "estimated1RM")]
    pub estimated_1rm: Option<f32>,
    #[serde(default)]
    pub previous_weight: Option<f32>,
    #[serde(default)]
    pub previous_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub improvement_percentage: f32,
    #[serde(default)]
    pub workout_id: Option<String>,
    #[serde(default)]
    pub source_set_id: Option<String>,
    pub record_date: DateTime<Utc>,
}

impl RemoteConvert for PersonalRecord {
    type Remote = RemotePersonalRecord;

    fn to_remote(&self) -> RemotePersonalRecord {
        RemotePersonalRecord {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            record_type: enum_name(&self.record_type),
            weight: self.weight,
            reps: self.reps,
            rpe: self.rpe,
            estimated_1rm: self.estimated_1rm,
            previous_weight: self.previous_weight,
            previous_date: to_optional_timestamp(self.previous_date),
            improvement_percentage: self.improvement_percentage,
            workout_id: self.workout_id.clone(),
            source_set_id: self.source_set_id.clone(),
            record_date: to_timestamp(self.record_date),
        }
    }

    fn from_remote(remote: RemotePersonalRecord) -> Self {
        Self {
            record_type: enum_from_name(&remote.record_type, "recordType"),
            id: remote.id,
            user_id: remote.user_id,
            exercise_id: remote.exercise_variation_id,
            weight: remote.weight,
            reps: remote.reps,
            rpe: remote.rpe,
            estimated_1rm: remote.estimated_1rm,
            previous_weight: remote.previous_weight,
            previous_date: from_optional_timestamp(remote.previous_date),
            improvement_percentage: remote.improvement_percentage,
            workout_id: remote.workout_id,
            source_set_id: remote.source_set_id,
            record_date: from_timestamp(remote.record_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOneRmHistory {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_variation_id: String,
    #[serde(rename = "oneRMEstimate")]
    pub one_rm_estimate: f32,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub source_set_id: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl RemoteConvert for OneRmHistory {
    type Remote = RemoteOneRmHistory;

    fn to_remote(&self) -> RemoteOneRmHistory {
        RemoteOneRmHistory {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            one_rm_estimate: self.one_rm_estimate,
            context: self.context.clone(),
            source_set_id: self.source_set_id.clone(),
            recorded_at: to_timestamp(self.recorded_at),
        }
    }

    fn from_remote(remote: RemoteOneRmHistory) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            exercise_id: remote.exercise_variation_id,
            one_rm_estimate: remote.one_rm_estimate,
            context: remote.context,
            source_set_id: remote.source_set_id,
            recorded_at: from_timestamp(remote.recorded_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExerciseUsage {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_variation_id: String,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub personal_notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for ExerciseUsage {
    type Remote = RemoteExerciseUsage;

    fn to_remote(&self) -> RemoteExerciseUsage {
        RemoteExerciseUsage {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            usage_count: self.usage_count,
            last_used: to_optional_timestamp(self.last_used),
            personal_notes: self.personal_notes.clone(),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteExerciseUsage) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            exercise_id: remote.exercise_variation_id,
            usage_count: remote.usage_count,
            last_used: from_optional_timestamp(remote.last_used),
            personal_notes: remote.personal_notes,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExerciseSwapHistory {
    pub id: String,
    pub user_id: Option<String>,
    pub original_exercise_id: String,
    pub swapped_to_exercise_id: String,
    #[serde(default)]
    pub workout_id: Option<String>,
    #[serde(default)]
    pub programme_id: Option<String>,
    pub swap_date: DateTime<Utc>,
}

impl RemoteConvert for ExerciseSwapHistory {
    type Remote = RemoteExerciseSwapHistory;

    fn to_remote(&self) -> RemoteExerciseSwapHistory {
        RemoteExerciseSwapHistory {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            original_exercise_id: self.original_exercise_id.clone(),
            swapped_to_exercise_id: self.swapped_to_exercise_id.clone(),
            workout_id: self.workout_id.clone(),
            programme_id: self.programme_id.clone(),
            swap_date: to_timestamp(self.swap_date),
        }
    }

    fn from_remote(remote: RemoteExerciseSwapHistory) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            original_exercise_id: remote.original_exercise_id,
            swapped_to_exercise_id: remote.swapped_to_exercise_id,
            workout_id: remote.workout_id,
            programme_id: remote.programme_id,
            swap_date: from_timestamp(remote.swap_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExercisePerformance {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_variation_id: String,
    pub workout_id: String,
    #[serde(default)]
    pub programme_id: Option<String>,
    pub target_weight: f32,
    pub achieved_weight: f32,
    pub target_sets: u32,
    pub completed_sets: u32,
    #[serde(default)]
    pub target_reps: Option<u32>,
    pub achieved_reps: u32,
    pub was_successful: bool,
    #[serde(default)]
    pub average_rpe: Option<f32>,
    pub workout_date: DateTime<Utc>,
}

impl RemoteConvert for ExercisePerformance {
    type Remote = RemoteExercisePerformance;

    fn to_remote(&self) -> RemoteExercisePerformance {
        RemoteExercisePerformance {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            workout_id: self.workout_id.clone(),
            programme_id: self.programme_id.clone(),
            target_weight: self.target_weight,
            achieved_weight: self.achieved_weight,
            target_sets: self.target_sets,
            completed_sets: self.completed_sets,
            target_reps: self.target_reps,
            achieved_reps: self.achieved_reps,
            was_successful: self.was_successful,
            average_rpe: self.average_rpe,
            workout_date: to_timestamp(self.workout_date),
        }
    }

    fn from_remote(remote: RemoteExercisePerformance) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            exercise_id: remote.exercise_variation_id,
            workout_id: remote.workout_id,
            programme_id: remote.programme_id,
            target_weight: remote.target_weight,
            achieved_weight: remote.achieved_weight,
            target_sets: remote.target_sets,
            completed_sets: remote.completed_sets,
            target_reps: remote.target_reps,
            achieved_reps: remote.achieved_reps,
            was_successful: remote.was_successful,
            average_rpe: remote.average_rpe,
            workout_date: from_timestamp(remote.workout_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteGlobalExerciseProgress {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_variation_id: String,
    pub current_working_weight: f32,
    pub estimated_max: f32,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub consecutive_stalls: u32,
    #[serde(default)]
    pub total_volume_last_30_days: f32,
    pub last_updated: DateTime<Utc>,
}

impl RemoteConvert for GlobalExerciseProgress {
    type Remote = RemoteGlobalExerciseProgress;

    fn to_remote(&self) -> RemoteGlobalExerciseProgress {
        RemoteGlobalExerciseProgress {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            current_working_weight: self.current_working_weight,
            estimated_max: self.estimated_max,
            trend: enum_name(&self.trend),
            consecutive_stalls: self.consecutive_stalls,
            total_volume_last_30_days: self.total_volume_last_30_days,
            last_updated: to_timestamp(self.last_updated),
        }
    }

    fn from_remote(remote: RemoteGlobalExerciseProgress) -> Self {
        Self {
            trend: enum_from_name(&remote.trend, "trend"),
            id: remote.id,
            user_id: remote.user_id,
            exercise_id: remote.exercise_variation_id,
            current_working_weight: remote.current_working_weight,
            estimated_max: remote.estimated_max,
            consecutive_stalls: remote.consecutive_stalls,
            total_volume_last_30_days: remote.total_volume_last_30_days,
            last_updated: from_timestamp(remote.last_updated),
        }
    }
}
