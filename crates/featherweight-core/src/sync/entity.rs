//! The syncable-entity contract shared by the local store, the remote
//! transfer helpers and the orchestrator.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::convert::RemoteConvert;

/// Every synced entity type, declared in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Exercise,
    Programme,
    ProgrammeWeek,
    ProgrammeWorkout,
    ProgrammeProgress,
    Workout,
    ExerciseLog,
    SetLog,
    WorkoutTemplate,
    TemplateExercise,
    TemplateSet,
    ExerciseMax,
    PersonalRecord,
    OneRmHistory,
    ExerciseUsage,
    ExerciseSwapHistory,
    ExercisePerformance,
    GlobalExerciseProgress,
    TrainingAnalysis,
    ParseRequest,
}

impl EntityKind {
    /// All kinds, parents before children.
    pub const ALL: [Self; 20] = [
        Self::Exercise,
        Self::Programme,
        Self::ProgrammeWeek,
        Self::ProgrammeWorkout,
        Self::ProgrammeProgress,
        Self::Workout,
        Self::ExerciseLog,
        Self::SetLog,
        Self::WorkoutTemplate,
        Self::TemplateExercise,
        Self::TemplateSet,
        Self::ExerciseMax,
        Self::PersonalRecord,
        Self::OneRmHistory,
        Self::ExerciseUsage,
        Self::ExerciseSwapHistory,
        Self::ExercisePerformance,
        Self::GlobalExerciseProgress,
        Self::TrainingAnalysis,
        Self::ParseRequest,
    ];

    /// Local table holding rows of this kind
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Exercise => "exercises",
            Self::Programme => "programmes",
            Self::ProgrammeWeek => "programme_weeks",
            Self::ProgrammeWorkout => "programme_workouts",
            Self::ProgrammeProgress => "programme_progress",
            Self::Workout => "workouts",
            Self::ExerciseLog => "exercise_logs",
            Self::SetLog => "set_logs",
            Self::WorkoutTemplate => "workout_templates",
            Self::TemplateExercise => "template_exercises",
            Self::TemplateSet => "template_sets",
            Self::ExerciseMax => "exercise_maxes",
            Self::PersonalRecord => "personal_records",
            Self::OneRmHistory => "one_rm_history",
            Self::ExerciseUsage => "exercise_usage",
            Self::ExerciseSwapHistory => "exercise_swap_history",
            Self::ExercisePerformance => "exercise_performance",
            Self::GlobalExerciseProgress => "global_exercise_progress",
            Self::TrainingAnalysis => "training_analyses",
            Self::ParseRequest => "parse_requests",
        }
    }

    /// Remote collection holding the user's documents of this kind
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Exercise => "customExercises",
            Self::Programme => "programmes",
            Self::ProgrammeWeek => "programmeWeeks",
            Self::ProgrammeWorkout => "programmeWorkouts",
            Self::ProgrammeProgress => "programmeProgress",
            Self::Workout => "workouts",
            Self::ExerciseLog => "exerciseLogs",
            Self::SetLog => "setLogs",
            Self::WorkoutTemplate => "workoutTemplates",
            Self::TemplateExercise => "templateExercises",
            Self::TemplateSet => "templateSets",
            Self::ExerciseMax => "exerciseMaxes",
            Self::PersonalRecord => "personalRecords",
            Self::OneRmHistory => "oneRmHistory",
            Self::ExerciseUsage => "exerciseUsage",
            Self::ExerciseSwapHistory => "exerciseSwapHistory",
            Self::ExercisePerformance => "exercisePerformance",
            Self::GlobalExerciseProgress => "globalExerciseProgress",
            Self::TrainingAnalysis => "trainingAnalyses",
            Self::ParseRequest => "parseRequests",
        }
    }

    /// Kinds whose rows this kind foreign-keys into
    pub const fn depends_on(self) -> &'static [Self] {
        match self {
            Self::Exercise
            | Self::Programme
            | Self::WorkoutTemplate
            | Self::TrainingAnalysis
            | Self::ParseRequest => &[],
            Self::ProgrammeWeek | Self::ProgrammeProgress | Self::Workout => &[Self::Programme],
            Self::ProgrammeWorkout => &[Self::ProgrammeWeek],
            Self::ExerciseLog => &[Self::Workout, Self::Exercise],
            Self::SetLog => &[Self::ExerciseLog],
            Self::TemplateExercise => &[Self::WorkoutTemplate, Self::Exercise],
            Self::TemplateSet => &[Self::TemplateExercise],
            Self::ExerciseMax
            | Self::PersonalRecord
            | Self::OneRmHistory
            | Self::ExerciseUsage
            | Self::GlobalExerciseProgress => &[Self::Exercise],
            Self::ExerciseSwapHistory | Self::ExercisePerformance => {
                &[Self::Exercise, Self::Workout]
            }
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// How a downloaded row is reconciled with the local copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Insert only when no local row has the same id
    InsertIfAbsent,
    /// Remote always replaces the local row
    Overwrite,
    /// Keep whichever copy holds the better value (see [`SyncEntity::keep_better`])
    KeepBetter,
    /// Match by [`SyncEntity::logical_key`] instead of id; the remote row,
    /// id included, replaces its local twin
    LogicalIdentity,
}

/// A relational column stored beside the JSON payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumn<'a> {
    pub name: &'static str,
    pub value: Option<&'a str>,
}

impl<'a> KeyColumn<'a> {
    pub const fn new(name: &'static str, value: &'a str) -> Self {
        Self {
            name,
            value: Some(value),
        }
    }

    pub const fn optional(name: &'static str, value: Option<&'a str>) -> Self {
        Self { name, value }
    }
}

/// A row type mirrored between the local store and the remote document store.
pub trait SyncEntity:
    RemoteConvert + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    const KIND: EntityKind;
    const MERGE_POLICY: MergePolicy;

    fn id(&self) -> &str;

    fn user_id(&self) -> Option<&str>;

    fn set_user_id(&mut self, user_id: Option<String>);

    /// Explicit or domain-derived modification time (Unix ms)
    fn last_modified(&self) -> i64;

    /// Relational columns (foreign keys and lookup keys) for the local table.
    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        Vec::new()
    }

    /// Identity shared by copies of the same logical row that carry different ids.
    fn logical_key(&self) -> Option<String> {
        None
    }

    /// Pick between a local row and its remote counterpart.
    ///
    /// Returns the row to store, or `None` to keep `local` untouched. Only
    /// consulted for [`MergePolicy::KeepBetter`].
    fn keep_better(local: &Self, remote: Self) -> Option<Self> {
        let _ = local;
        Some(remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_follow_dependency_order() {
        for (position, kind) in EntityKind::ALL.iter().enumerate() {
            for parent in kind.depends_on() {
                let parent_position = EntityKind::ALL
                    .iter()
                    .position(|candidate| candidate == parent)
                    .unwrap();
                assert!(
                    parent_position < position,
                    "{kind} must come after {parent}"
                );
            }
        }
    }

    #[test]
    fn table_and_collection_names_are_unique() {
        let mut tables = EntityKind::ALL.map(EntityKind::table_name).to_vec();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), EntityKind::ALL.len());

        let mut collections = EntityKind::ALL.map(EntityKind::collection).to_vec();
        collections.sort_unstable();
        collections.dedup();
        assert_eq!(collections.len(), EntityKind::ALL.len());
    }
}
