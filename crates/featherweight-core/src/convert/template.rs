use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{from_timestamp, to_timestamp, RemoteConvert};
use crate::models::{TemplateExercise, TemplateSet, WorkoutTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWorkoutTemplate {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for WorkoutTemplate {
    type Remote = RemoteWorkoutTemplate;

    fn to_remote(&self) -> RemoteWorkoutTemplate {
        RemoteWorkoutTemplate {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: to_timestamp(self.created_at),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteWorkoutTemplate) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            name: remote.name,
            description: remote.description,
            created_at: from_timestamp(remote.created_at),
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTemplateExercise {
    pub id: String,
    pub user_id: Option<String>,
    pub template_id: String,
    pub exercise_variation_id: String,
    pub exercise_order: u32,
    #[serde(default)]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for TemplateExercise {
    type Remote = RemoteTemplateExercise;

    fn to_remote(&self) -> RemoteTemplateExercise {
        RemoteTemplateExercise {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            template_id: self.template_id.clone(),
            exercise_variation_id: self.exercise_id.clone(),
            exercise_order: self.exercise_order,
            notes: self.notes.clone(),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteTemplateExercise) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            template_id: remote.template_id,
            exercise_id: remote.exercise_variation_id,
            exercise_order: remote.exercise_order,
            notes: remote.notes,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTemplateSet {
    pub id: String,
    pub user_id: Option<String>,
    pub template_exercise_id: String,
    pub set_order: u32,
    #[serde(default)]
    pub target_reps: Option<u32>,
    #[serde(default)]
    pub target_weight: Option<f32>,
    #[serde(default)]
    pub target_rpe: Option<f32>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for TemplateSet {
    type Remote = RemoteTemplateSet;

    fn to_remote(&self) -> RemoteTemplateSet {
        RemoteTemplateSet {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            template_exercise_id: self.template_exercise_id.clone(),
            set_order: self.set_order,
            target_reps: self.target_reps,
            target_weight: self.target_weight,
            target_rpe: self.target_rpe,
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteTemplateSet) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            template_exercise_id: remote.template_exercise_id,
            set_order: remote.set_order,
            target_reps: remote.target_reps,
            target_weight: remote.target_weight,
            target_rpe: remote.target_rpe,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}
