//! Workout template models

use serde::{Deserialize, Serialize};

/// A reusable workout layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// An exercise slot in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    pub id: String,
    pub user_id: Option<String>,
    pub template_id: String,
    pub exercise_id: String,
    pub exercise_order: u32,
    pub notes: Option<String>,
    pub updated_at: i64,
}

/// A prescribed set for a template exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub id: String,
    pub user_id: Option<String>,
    pub template_exercise_id: String,
    pub set_order: u32,
    pub target_reps: Option<u32>,
    pub target_weight: Option<f32>,
    pub target_rpe: Option<f32>,
    pub updated_at: i64,
}
