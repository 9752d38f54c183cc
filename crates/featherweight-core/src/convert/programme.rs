use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    enum_from_name, enum_name, from_optional_timestamp, from_timestamp, to_optional_timestamp,
    to_timestamp, RemoteConvert,
};
use crate::models::{Programme, ProgrammeProgress, ProgrammeWeek, ProgrammeWorkout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProgramme {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_weeks: u32,
    #[serde(default)]
    pub programme_type: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for Programme {
    type Remote = RemoteProgramme;

    fn to_remote(&self) -> RemoteProgramme {
        RemoteProgramme {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            duration_weeks: self.duration_weeks,
            programme_type: enum_name(&self.programme_type),
            difficulty: enum_name(&self.difficulty),
            is_custom: self.is_custom,
            is_active: self.is_active,
            started_at: to_optional_timestamp(self.started_at),
            completed_at: to_optional_timestamp(self.completed_at),
            created_at: to_timestamp(self.created_at),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteProgramme) -> Self {
        Self {
            programme_type: enum_from_name(&remote.programme_type, "programmeType"),
            difficulty: enum_from_name(&remote.difficulty, "difficulty"),
            id: remote.id,
            user_id: remote.user_id,
            name: remote.name,
            description: remote.description,
            duration_weeks: remote.duration_weeks,
            is_custom: remote.is_custom,
            is_active: remote.is_active,
            started_at: from_optional_timestamp(remote.started_at),
            completed_at: from_optional_timestamp(remote.completed_at),
            created_at: from_timestamp(remote.created_at),
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProgrammeWeek {
    pub id: String,
    pub user_id: Option<String>,
    pub programme_id: String,
    pub week_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_deload: bool,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for ProgrammeWeek {
    type Remote = RemoteProgrammeWeek;

    fn to_remote(&self) -> RemoteProgrammeWeek {
        RemoteProgrammeWeek {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            programme_id: self.programme_id.clone(),
            week_number: self.week_number,
            name: self.name.clone(),
            is_deload: self.is_deload,
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteProgrammeWeek) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            programme_id: remote.programme_id,
            week_number: remote.week_number,
            name: remote.name,
            is_deload: remote.is_deload,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProgrammeWorkout {
    pub id: String,
    pub user_id: Option<String>,
    pub week_id: String,
    pub day_number: u32,
    pub name: String,
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub workout_structure: String,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for ProgrammeWorkout {
    type Remote = RemoteProgrammeWorkout;

    fn to_remote(&self) -> RemoteProgrammeWorkout {
        RemoteProgrammeWorkout {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            week_id: self.week_id.clone(),
            day_number: self.day_number,
            name: self.name.clone(),
            estimated_duration: self.estimated_duration_minutes,
            workout_structure: self.workout_structure.clone(),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteProgrammeWorkout) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            week_id: remote.week_id,
            day_number: remote.day_number,
            name: remote.name,
            estimated_duration_minutes: remote.estimated_duration,
            workout_structure: remote.workout_structure,
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProgrammeProgress {
    pub id: String,
    pub user_id: Option<String>,
    pub programme_id: String,
    pub current_week: u32,
    pub current_day: u32,
    #[serde(default)]
    pub completed_workouts: u32,
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub last_workout_date: Option<DateTime<Utc>>,
    /// Derived on the way out; ignored on the way back in
    #[serde(default)]
    pub adherence_percentage: f32,
    pub updated_at: DateTime<Utc>,
}

impl RemoteConvert for ProgrammeProgress {
    type Remote = RemoteProgrammeProgress;

    fn to_remote(&self) -> RemoteProgrammeProgress {
        RemoteProgrammeProgress {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            programme_id: self.programme_id.clone(),
            current_week: self.current_week,
            current_day: self.current_day,
            completed_workouts: self.completed_workouts,
            total_workouts: self.total_workouts,
            last_workout_date: to_optional_timestamp(self.last_workout_date),
            adherence_percentage: self.adherence_percentage(),
            updated_at: to_timestamp(self.updated_at),
        }
    }

    fn from_remote(remote: RemoteProgrammeProgress) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            programme_id: remote.programme_id,
            current_week: remote.current_week,
            current_day: remote.current_day,
            completed_workouts: remote.completed_workouts,
            total_workouts: remote.total_workouts,
            last_workout_date: from_optional_timestamp(remote.last_workout_date),
            updated_at: from_timestamp(remote.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProgrammeDifficulty, ProgrammeType};
    use pretty_assertions::assert_eq;

    #[test]
    fn programme_survives_remote_roundtrip() {
        let mut programme = Programme::new("user-1", "5/3/1", 12);
        programme.programme_type = ProgrammeType::Powerlifting;
        programme.difficulty = ProgrammeDifficulty::Advanced;
        programme.started_at = Some(1_700_000_000_000);

        assert_eq!(Programme::from_remote(programme.to_remote()), programme);
    }

    #[test]
    fn unknown_programme_type_falls_back_to_custom() {
        let mut remote = Programme::new("user-1", "GZCL", 8).to_remote();
        remote.programme_type = "CONJUGATE".to_string();

        let programme = Programme::from_remote(remote);
        assert_eq!(programme.programme_type, ProgrammeType::Custom);
    }
}
