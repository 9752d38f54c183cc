//! `SyncEntity` implementations for every synced model.

use super::entity::{EntityKind, KeyColumn, MergePolicy, SyncEntity};
use crate::models::{
    Exercise, ExerciseLog, ExerciseMax, ExercisePerformance, ExerciseSwapHistory, ExerciseUsage,
    GlobalExerciseProgress, OneRmHistory, ParseRequest, PersonalRecord, Programme,
    ProgrammeProgress, ProgrammeWeek, ProgrammeWorkout, SetLog, TemplateExercise, TemplateSet,
    TrainingAnalysis, Workout, WorkoutTemplate,
};

/// Run `$body` with `$ty` bound to the model type of `$kind`.
macro_rules! with_entity_type {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            $crate::sync::EntityKind::Exercise => {
                type $ty = $crate::models::Exercise;
                $body
            }
            $crate::sync::EntityKind::Programme => {
                type $ty = $crate::models::Programme;
                $body
            }
            $crate::sync::EntityKind::ProgrammeWeek => {
                type $ty = $crate::models::ProgrammeWeek;
                $body
            }
            $crate::sync::EntityKind::ProgrammeWorkout => {
                type $ty = $crate::models::ProgrammeWorkout;
                $body
            }
            $crate::sync::EntityKind::ProgrammeProgress => {
                type $ty = $crate::models::ProgrammeProgress;
                $body
            }
            $crate::sync::EntityKind::Workout => {
                type $ty = $crate::models::Workout;
                $body
            }
            $crate::sync::EntityKind::ExerciseLog => {
                type $ty = $crate::models::ExerciseLog;
                $body
            }
            $crate::sync::EntityKind::SetLog => {
                type $ty = $crate::models::SetLog;
                $body
            }
            $crate::sync::EntityKind::WorkoutTemplate => {
                type $ty = $crate::models::WorkoutTemplate;
                $body
            }
            $crate::sync::EntityKind::TemplateExercise => {
                type $ty = $crate::models::TemplateExercise;
                $body
            }
            $crate::sync::EntityKind::TemplateSet => {
                type $ty = $crate::models::TemplateSet;
                $body
            }
            $crate::sync::EntityKind::ExerciseMax => {
                type $ty = $crate::models::ExerciseMax;
                $body
            }
            $crate::sync::EntityKind::PersonalRecord => {
                type $ty = $crate::models::PersonalRecord;
                $body
            }
            $crate::sync::EntityKind::OneRmHistory => {
                type $ty = $crate::models::OneRmHistory;
                $body
            }
            $crate::sync::EntityKind::ExerciseUsage => {
                type $ty = $crate::models::ExerciseUsage;
                $body
            }
            $crate::sync::EntityKind::ExerciseSwapHistory => {
                type $ty = $crate::models::ExerciseSwapHistory;
                $body
            }
            $crate::sync::EntityKind::ExercisePerformance => {
                type $ty = $crate::models::ExercisePerformance;
                $body
            }
            $crate::sync::EntityKind::GlobalExerciseProgress => {
                type $ty = $crate::models::GlobalExerciseProgress;
                $body
            }
            $crate::sync::EntityKind::TrainingAnalysis => {
                type $ty = $crate::models::TrainingAnalysis;
                $body
            }
            $crate::sync::EntityKind::ParseRequest => {
                type $ty = $crate::models::ParseRequest;
                $body
            }
        }
    };
}

pub(crate) use with_entity_type;

/// Accessors shared by every model: all of them store `id` and `user_id` the same way.
macro_rules! identity_accessors {
    () => {
        fn id(&self) -> &str {
            &self.id
        }

        fn user_id(&self) -> Option<&str> {
            self.user_id.as_deref()
        }

        fn set_user_id(&mut self, user_id: Option<String>) {
            self.user_id = user_id;
        }
    };
}

impl SyncEntity for Exercise {
    const KIND: EntityKind = EntityKind::Exercise;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }
}

impl SyncEntity for Programme {
    const KIND: EntityKind = EntityKind::Programme;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }
}

impl SyncEntity for ProgrammeWeek {
    const KIND: EntityKind = EntityKind::ProgrammeWeek;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("programme_id", &self.programme_id)]
    }
}

impl SyncEntity for ProgrammeWorkout {
    const KIND: EntityKind = EntityKind::ProgrammeWorkout;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("week_id", &self.week_id)]
    }
}

impl SyncEntity for ProgrammeProgress {
    const KIND: EntityKind = EntityKind::ProgrammeProgress;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("programme_id", &self.programme_id)]
    }
}

impl SyncEntity for Workout {
    const KIND: EntityKind = EntityKind::Workout;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::optional(
            "programme_id",
            self.programme_id.as_deref(),
        )]
    }
}

impl SyncEntity for ExerciseLog {
    const KIND: EntityKind = EntityKind::ExerciseLog;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![
            KeyColumn::new("workout_id", &self.workout_id),
            KeyColumn::new("exercise_id", &self.exercise_id),
        ]
    }
}

impl SyncEntity for SetLog {
    const KIND: EntityKind = EntityKind::SetLog;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.completed_at.unwrap_or_default()
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("exercise_log_id", &self.exercise_log_id)]
    }
}

impl SyncEntity for WorkoutTemplate {
    const KIND: EntityKind = EntityKind::WorkoutTemplate;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }
}

impl SyncEntity for TemplateExercise {
    const KIND: EntityKind = EntityKind::TemplateExercise;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![
            KeyColumn::new("template_id", &self.template_id),
            KeyColumn::new("exercise_id", &self.exercise_id),
        ]
    }
}

impl SyncEntity for TemplateSet {
    const KIND: EntityKind = EntityKind::TemplateSet;
    const MERGE_POLICY: MergePolicy = MergePolicy::Overwrite;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new(
            "template_exercise_id",
            &self.template_exercise_id,
        )]
    }
}

impl SyncEntity for ExerciseMax {
    const KIND: EntityKind = EntityKind::ExerciseMax;
    const MERGE_POLICY: MergePolicy = MergePolicy::KeepBetter;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.recorded_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("exercise_id", &self.exercise_id)]
    }

    fn keep_better(local: &Self, remote: Self) -> Option<Self> {
        (remote.one_rm_estimate > local.one_rm_estimate).then_some(remote)
    }
}

impl SyncEntity for PersonalRecord {
    const KIND: EntityKind = EntityKind::PersonalRecord;
    const MERGE_POLICY: MergePolicy = MergePolicy::KeepBetter;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.record_date
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![
            KeyColumn::new("exercise_id", &self.exercise_id),
            KeyColumn::optional("source_set_id", self.source_set_id.as_deref()),
        ]
    }

    fn keep_better(local: &Self, remote: Self) -> Option<Self> {
        remote.beats(local).then_some(remote)
    }
}

impl SyncEntity for OneRmHistory {
    const KIND: EntityKind = EntityKind::OneRmHistory;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.recorded_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![
            KeyColumn::new("exercise_id", &self.exercise_id),
            KeyColumn::optional("source_set_id", self.source_set_id.as_deref()),
        ]
    }
}

impl SyncEntity for ExerciseUsage {
    const KIND: EntityKind = EntityKind::ExerciseUsage;
    const MERGE_POLICY: MergePolicy = MergePolicy::KeepBetter;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.updated_at
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("exercise_id", &self.exercise_id)]
    }

    fn keep_better(local: &Self, remote: Self) -> Option<Self> {
        let merged = local.merged_with(&remote);
        (merged != *local).then_some(merged)
    }
}

impl SyncEntity for ExerciseSwapHistory {
    const KIND: EntityKind = EntityKind::ExerciseSwapHistory;
    const MERGE_POLICY: MergePolicy = MergePolicy::LogicalIdentity;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.swap_date
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![
            KeyColumn::new("original_exercise_id", &self.original_exercise_id),
            KeyColumn::new("swapped_to_exercise_id", &self.swapped_to_exercise_id),
            KeyColumn::optional("workout_id", self.workout_id.as_deref()),
        ]
    }

    fn logical_key(&self) -> Option<String> {
        Some(format!(
            "{}|{}|{}|{}",
            self.user_id.as_deref().unwrap_or_default(),
            self.original_exercise_id,
            self.swapped_to_exercise_id,
            self.workout_id.as_deref().unwrap_or_default()
        ))
    }
}

impl SyncEntity for ExercisePerformance {
    const KIND: EntityKind = EntityKind::ExercisePerformance;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.workout_date
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![
            KeyColumn::new("exercise_id", &self.exercise_id),
            KeyColumn::new("workout_id", &self.workout_id),
        ]
    }
}

impl SyncEntity for GlobalExerciseProgress {
    const KIND: EntityKind = EntityKind::GlobalExerciseProgress;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.last_updated
    }

    fn key_columns(&self) -> Vec<KeyColumn<'_>> {
        vec![KeyColumn::new("exercise_id", &self.exercise_id)]
    }
}

impl SyncEntity for TrainingAnalysis {
    const KIND: EntityKind = EntityKind::TrainingAnalysis;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.analysis_date
    }
}

impl SyncEntity for ParseRequest {
    const KIND: EntityKind = EntityKind::ParseRequest;
    const MERGE_POLICY: MergePolicy = MergePolicy::InsertIfAbsent;

    identity_accessors!();

    fn last_modified(&self) -> i64 {
        self.completed_at.unwrap_or(self.created_at)
    }
}
