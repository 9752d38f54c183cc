//! Exercise model
//!
//! System exercises form the shared catalogue (`user_id == None`); custom
//! exercises live in the same table and are owned by one user.

use serde::{Deserialize, Serialize};

use super::new_entity_id;
use crate::util::unix_millis_now;

/// Primary body region trained by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseCategory {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    FullBody,
    Cardio,
    #[default]
    Other,
}

/// Equipment needed to perform an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Bodyweight,
    Kettlebell,
    Band,
    #[default]
    Other,
}

/// An exercise in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    /// `None` for system exercises
    pub user_id: Option<String>,
    pub name: String,
    pub category: ExerciseCategory,
    pub equipment: Equipment,
    pub movement_pattern: Option<String>,
    pub is_compound: bool,
    pub aliases: Vec<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Exercise {
    /// Create a shared catalogue exercise
    #[must_use]
    pub fn system(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ExerciseCategory,
        equipment: Equipment,
    ) -> Self {
        let now = unix_millis_now();
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            category,
            equipment,
            movement_pattern: None,
            is_compound: false,
            aliases: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a user-owned custom exercise
    #[must_use]
    pub fn custom(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut exercise = Self::system(
            new_entity_id(),
            name,
            ExerciseCategory::default(),
            Equipment::default(),
        );
        exercise.user_id = Some(user_id.into());
        exercise
    }

    /// Whether this exercise belongs to the shared catalogue
    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.user_id.is_none()
    }
}
