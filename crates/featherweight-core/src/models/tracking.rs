//! Derived tracking models: maxes, personal records, usage and progress

use serde::{Deserialize, Serialize};

/// How an exercise max was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaxSource {
    Manual,
    #[default]
    Estimated,
    Tested,
}

/// Metric a personal record is measured by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    #[default]
    Weight,
    #[serde(rename = "ESTIMATED_1RM")]
    Estimated1Rm,
}

/// Direction of recent progress on an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressTrend {
    Improving,
    #[default]
    Stalling,
    Declining,
}

/// Current best one-rep-max estimate for an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseMax {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_id: String,
    pub one_rm_estimate: f32,
    pub one_rm_context: Option<String>,
    /// Confidence in the estimate, 0.0 to 1.0
    pub one_rm_confidence: f32,
    pub source: MaxSource,
    pub recorded_at: i64,
}

/// A personal best for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_id: String,
    pub record_type: RecordType,
    pub weight: f32,
    pub reps: u32,
    pub rpe: Option<f32>,
    pub estimated_1rm: Option<f32>,
    pub previous_weight: Option<f32>,
    pub previous_date: Option<i64>,
    pub improvement_percentage: f32,
    pub workout_id: Option<String>,
    /// Set that produced this record; deleting the set removes the record
    pub source_set_id: Option<String>,
    pub record_date: i64,
}

impl PersonalRecord {
    /// Value this record is ranked by, according to its type
    #[must_use]
    pub fn ranking_value(&self) -> f32 {
        match self.record_type {
            RecordType::Weight => self.weight,
            RecordType::Estimated1Rm => self.estimated_1rm.unwrap_or(0.0),
        }
    }

    /// Whether `self` is a strictly better record than `other`
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        self.ranking_value() > other.ranking_value()
    }
}

/// Historical 1RM estimate point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneRmHistory {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_id: String,
    pub one_rm_estimate: f32,
    pub context: String,
    pub source_set_id: Option<String>,
    pub recorded_at: i64,
}

/// How often and how recently a user has performed an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseUsage {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_id: String,
    pub usage_count: u32,
    pub last_used: Option<i64>,
    pub personal_notes: Option<String>,
    pub updated_at: i64,
}

impl ExerciseUsage {
    /// Combine two views of the same usage row.
    ///
    /// Keeps the larger count, the most recent last-used time and `self`'s
    /// notes unless they are absent.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            id: self.id.clone(),
            user_id: self.user_id.clone().or_else(|| other.user_id.clone()),
            exercise_id: self.exercise_id.clone(),
            usage_count: self.usage_count.max(other.usage_count),
            last_used: self.last_used.max(other.last_used),
            personal_notes: self
                .personal_notes
                .clone()
                .or_else(|| other.personal_notes.clone()),
            updated_at: self.updated_at.max(other.updated_at),
        }
    }
}

/// A recorded substitution of one exercise for another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSwapHistory {
    pub id: String,
    pub user_id: Option<String>,
    pub original_exercise_id: String,
    pub swapped_to_exercise_id: String,
    pub workout_id: Option<String>,
    pub programme_id: Option<String>,
    pub swap_date: i64,
}

/// Target-versus-achieved performance of an exercise in one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePerformance {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_id: String,
    pub workout_id: String,
    pub programme_id: Option<String>,
    pub target_weight: f32,
    pub achieved_weight: f32,
    pub target_sets: u32,
    pub completed_sets: u32,
    pub target_reps: Option<u32>,
    pub achieved_reps: u32,
    pub was_successful: bool,
    pub average_rpe: Option<f32>,
    pub workout_date: i64,
}

/// Long-running progress summary for an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalExerciseProgress {
    pub id: String,
    pub user_id: Option<String>,
    pub exercise_id: String,
    pub current_working_weight: f32,
    pub estimated_max: f32,
    pub trend: ProgressTrend,
    pub consecutive_stalls: u32,
    pub total_volume_last_30_days: f32,
    pub last_updated: i64,
}
