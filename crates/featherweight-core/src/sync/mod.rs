//! Bidirectional sync between the local store and the remote document store.
//!
//! A pass downloads remote changes for every entity type in dependency order
//! (exercises first, derived tracking data last), merges them according to
//! each type's [`MergePolicy`], then uploads the user's full local state and
//! stamps the remote sync metadata. [`SyncManager`] serializes passes and
//! turns every expected failure into a [`SyncOutcome`].

mod auth;
mod device;
mod entities;
mod entity;
mod merge;
mod orchestrator;
mod outcome;
mod strategies;
mod throttle;
mod transfer;

#[cfg(test)]
mod tests;

pub use auth::{AuthProvider, StaticAuthProvider};
pub use device::{default_device_name, load_or_create_device_identity};
pub use entity::{EntityKind, KeyColumn, MergePolicy, SyncEntity};
pub use merge::{merge_rows, MergeStats};
pub use orchestrator::SyncManager;
pub use outcome::{SyncError, SyncOutcome, SyncResult, THROTTLED_MESSAGE};
pub use strategies::{CustomExerciseStrategy, ReferenceSyncStrategy, SystemExerciseStrategy};
pub use throttle::ThrottleGate;
pub use transfer::{download_entities, upload_entities, Download};

pub(crate) use entities::with_entity_type;
