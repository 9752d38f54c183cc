//! Data models for Featherweight
//!
//! Every synced row carries a string id and an optional owning user id. A row
//! whose `user_id` is `None` is either shared reference data (system
//! exercises) or local-only and is never uploaded.

mod analysis;
mod exercise;
mod programme;
mod sync_metadata;
mod template;
mod tracking;
mod workout;

pub use analysis::{ParseRequest, ParseRequestStatus, TrainingAnalysis};
pub use exercise::{Equipment, Exercise, ExerciseCategory};
pub use programme::{
    Programme, ProgrammeDifficulty, ProgrammeProgress, ProgrammeType, ProgrammeWeek,
    ProgrammeWorkout,
};
pub use sync_metadata::{DeviceIdentity, SyncMetadata};
pub use template::{TemplateExercise, TemplateSet, WorkoutTemplate};
pub use tracking::{
    ExerciseMax, ExercisePerformance, ExerciseSwapHistory, ExerciseUsage, GlobalExerciseProgress,
    MaxSource, OneRmHistory, PersonalRecord, ProgressTrend, RecordType,
};
pub use workout::{ExerciseLog, SetLog, Workout, WorkoutStatus};

/// Generate a new random entity identifier.
#[must_use]
pub fn new_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
