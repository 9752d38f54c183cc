//! Download-and-merge routines for exercise reference data.
//!
//! Exercises are merged before anything that references them. System
//! exercises live in a shared, ownerless catalogue; custom exercises belong
//! to one user. Both are replaced wholesale by the remote copy.

use chrono::{DateTime, Utc};

use super::entity::SyncEntity;
use super::merge::{merge_rows, MergeStats};
use super::outcome::{SyncError, SyncResult};
use super::transfer::download_entities;
use crate::db::LocalStore;
use crate::models::Exercise;
use crate::remote::{RemoteStore, SYSTEM_EXERCISES_COLLECTION};

#[allow(async_fn_in_trait)]
pub trait ReferenceSyncStrategy {
    fn name(&self) -> &'static str;

    /// Download rows changed after `since` (all when `None`) and merge them.
    async fn download_and_merge<L, R>(
        &self,
        local: &L,
        remote: &R,
        user_id: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> SyncResult<MergeStats>
    where
        L: LocalStore,
        R: RemoteStore;
}

/// Shared exercise catalogue, stored locally without an owner
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExerciseStrategy;

impl ReferenceSyncStrategy for SystemExerciseStrategy {
    fn name(&self) -> &'static str {
        "system exercises"
    }

    async fn download_and_merge<L, R>(
        &self,
        local: &L,
        remote: &R,
        _user_id: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> SyncResult<MergeStats>
    where
        L: LocalStore,
        R: RemoteStore,
    {
        let download =
            download_entities::<R, Exercise>(remote, None, SYSTEM_EXERCISES_COLLECTION, since)
                .await
                .map_err(SyncError::remote("download system exercises"))?;

        let rows = download
            .rows
            .into_iter()
            .map(|mut exercise| {
                exercise.set_user_id(None);
                exercise
            })
            .collect();
        let mut stats = merge_rows(local, None, rows)
            .await
            .map_err(SyncError::local("merge system exercises"))?;
        stats.malformed += download.malformed;
        Ok(stats)
    }
}

/// Exercises created by the signed-in user
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomExerciseStrategy;

impl ReferenceSyncStrategy for CustomExerciseStrategy {
    fn name(&self) -> &'static str {
        "custom exercises"
    }

    async fn download_and_merge<L, R>(
        &self,
        local: &L,
        remote: &R,
        user_id: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> SyncResult<MergeStats>
    where
        L: LocalStore,
        R: RemoteStore,
    {
        let user_id = user_id.ok_or(SyncError::NotAuthenticated)?;
        let download = download_entities::<R, Exercise>(
            remote,
            Some(user_id),
            Exercise::KIND.collection(),
            since,
        )
        .await
        .map_err(SyncError::remote("download custom exercises"))?;

        let rows = download
            .rows
            .into_iter()
            .map(|mut exercise| {
                exercise.set_user_id(Some(user_id.to_string()));
                exercise
            })
            .collect();
        let mut stats = merge_rows(local, Some(user_id), rows)
            .await
            .map_err(SyncError::local("merge custom exercises"))?;
        stats.malformed += download.malformed;
        Ok(stats)
    }
}
