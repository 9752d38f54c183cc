use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{enum_from_name, enum_name, from_timestamp, to_timestamp, RemoteConvert};
use crate::models::Exercise;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExercise {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub movement_pattern: Option<String>,
    #[serde(default)]
    pub is_compound: bool,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for Exercise {
    type Remote = RemoteExercise;

    fn to_remote(&self) -> RemoteExercise {
        RemoteExercise {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            category: enum_name(&self.category),
            equipment: enum_name(&self.equipment),
            movement_pattern: self.movement_pattern.clone(),
            is_compound: self.is_compound,
            aliases: self.aliases.clone(),
            created_at: to_timestamp(self.created_at),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteExercise) -> Self {
        Self {
            category: enum_from_name(&remote.category, "category"),
            equipment: enum_from_name(&remote.equipment, "equipment"),
            id: remote.id,
            user_id: remote.user_id,
            name: remote.name,
            movement_pattern: remote.movement_pattern,
            is_compound: remote.is_compound,
            aliases: remote.aliases,
            created_at: from_timestamp(remote.created_at),
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Equipment, ExerciseCategory};
    use pretty_assertions::assert_eq;

    #[test]
    fn exercise_survives_remote_roundtrip() {
        let mut exercise = Exercise::system(
            "deadlift",
            "Deadlift",
            ExerciseCategory::Back,
            Equipment::Barbell,
        );
        exercise.aliases = vec!["DL".to_string()];
        exercise.is_compound = true;

        let restored = Exercise::from_remote(exercise.to_remote());
        assert_eq!(restored, exercise);
    }

    #[test]
    fn remote_exercise_uses_camel_case_fields() {
        let exercise = Exercise::system("row", "Row", ExerciseCategory::Back, Equipment::Cable);
        let json = serde_json::to_value(exercise.to_remote()).unwrap();
        assert_eq!(json["isCompound"], serde_json::json!(false));
        assert_eq!(json["equipment"], serde_json::json!("CABLE"));
        assert!(json.get("is_compound").is_none());
    }
}
