//! Programme hierarchy models: programme, weeks, scheduled workouts, progress

use serde::{Deserialize, Serialize};

use super::new_entity_id;
use crate::util::unix_millis_now;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgrammeType {
    Strength,
    Hypertrophy,
    Powerlifting,
    GeneralFitness,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgrammeDifficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// A multi-week training programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programme {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub duration_weeks: u32,
    pub programme_type: ProgrammeType,
    pub difficulty: ProgrammeDifficulty,
    pub is_custom: bool,
    pub is_active: bool,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Programme {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, duration_weeks: u32) -> Self {
        let now = unix_millis_now();
        Self {
            id: new_entity_id(),
            user_id: Some(user_id.into()),
            name: name.into(),
            description: None,
            duration_weeks,
            programme_type: ProgrammeType::default(),
            difficulty: ProgrammeDifficulty::default(),
            is_custom: true,
            is_active: false,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One week of a programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeWeek {
    pub id: String,
    pub user_id: Option<String>,
    pub programme_id: String,
    pub week_number: u32,
    pub name: Option<String>,
    pub is_deload: bool,
    pub updated_at: i64,
}

/// A scheduled workout inside a programme week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeWorkout {
    pub id: String,
    pub user_id: Option<String>,
    pub week_id: String,
    pub day_number: u32,
    pub name: String,
    pub estimated_duration_minutes: Option<u32>,
    /// Exercise/set layout as a JSON document
    pub workout_structure: String,
    pub updated_at: i64,
}

/// A user's position within a programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeProgress {
    pub id: String,
    pub user_id: Option<String>,
    pub programme_id: String,
    pub current_week: u32,
    pub current_day: u32,
    pub completed_workouts: u32,
    pub total_workouts: u32,
    pub last_workout_date: Option<i64>,
    pub updated_at: i64,
}

impl ProgrammeProgress {
    /// Share of scheduled workouts completed, in percent
    #[must_use]
    pub fn adherence_percentage(&self) -> f32 {
        if self.total_workouts == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed_workouts as f32 / self.total_workouts as f32;
        ratio * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adherence_handles_empty_programme() {
        let progress = ProgrammeProgress {
            id: "p".to_string(),
            user_id: Some("u".to_string()),
            programme_id: "prog".to_string(),
            current_week: 1,
            current_day: 1,
            completed_workouts: 0,
            total_workouts: 0,
            last_workout_date: None,
            updated_at: 0,
        };
        assert!(progress.adherence_percentage().abs() < f32::EPSILON);
    }

    #[test]
    fn adherence_is_percentage_of_total() {
        let progress = ProgrammeProgress {
            id: "p".to_string(),
            user_id: Some("u".to_string()),
            programme_id: "prog".to_string(),
            current_week: 2,
            current_day: 1,
            completed_workouts: 3,
            total_workouts: 12,
            last_workout_date: None,
            updated_at: 0,
        };
        assert!((progress.adherence_percentage() - 25.0).abs() < 0.001);
    }
}
