//! The sync orchestrator: one serialized pass at a time, downloads merged in
//! dependency order before local state is uploaded.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::auth::AuthProvider;
use super::entities::with_entity_type;
use super::entity::{EntityKind, SyncEntity};
use super::merge::{merge_rows, MergeStats};
use super::outcome::{SyncError, SyncOutcome, SyncResult, THROTTLED_MESSAGE};
use super::strategies::{
    CustomExerciseStrategy, ReferenceSyncStrategy, SystemExerciseStrategy,
};
use super::throttle::ThrottleGate;
use super::transfer::{download_entities, upload_entities};
use crate::config::SyncSettings;
use crate::db::LocalStore;
use crate::models::{DeviceIdentity, SyncMetadata, Workout};
use crate::remote::RemoteStore;
use crate::util::unix_millis_now;

/// Coordinates sync passes between the local store and the remote store.
///
/// All passes (full sync, user-data sync, restore, system reference sync)
/// share one lock, so at most one runs at a time; a second caller waits for
/// the first to finish.
pub struct SyncManager<L, R, A> {
    local: L,
    remote: R,
    auth: A,
    device: DeviceIdentity,
    throttle: ThrottleGate,
    pass_lock: Mutex<()>,
}

impl<L, R, A> SyncManager<L, R, A>
where
    L: LocalStore,
    R: RemoteStore,
    A: AuthProvider,
{
    pub fn new(
        local: L,
        remote: R,
        auth: A,
        device: DeviceIdentity,
        settings: &SyncSettings,
    ) -> Self {
        Self {
            local,
            remote,
            auth,
            device,
            throttle: ThrottleGate::new(settings.min_sync_interval()),
            pass_lock: Mutex::new(()),
        }
    }

    pub const fn local(&self) -> &L {
        &self.local
    }

    pub const fn remote(&self) -> &R {
        &self.remote
    }

    pub const fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    /// Full two-way sync for the signed-in user.
    pub async fn sync_all(&self) -> SyncOutcome {
        let _pass = self.pass_lock.lock().await;
        if !self.throttle.try_begin(unix_millis_now()) {
            tracing::debug!("Sync attempt throttled");
            return SyncOutcome::Skipped(THROTTLED_MESSAGE.to_string());
        }

        let Some(user_id) = self.auth.current_user_id() else {
            tracing::warn!("Sync requested without a signed-in user");
            return SyncOutcome::Error(SyncError::NotAuthenticated.to_string());
        };

        finish("sync", self.run_user_pass(&user_id).await)
    }

    /// Full two-way sync for an explicit user, bypassing the auth lookup.
    pub async fn sync_user_data(&self, user_id: &str) -> SyncOutcome {
        let _pass = self.pass_lock.lock().await;
        if !self.throttle.try_begin(unix_millis_now()) {
            tracing::debug!(user_id, "Sync attempt throttled");
            return SyncOutcome::Skipped(THROTTLED_MESSAGE.to_string());
        }

        finish("user data sync", self.run_user_pass(user_id).await)
    }

    /// Replace the signed-in user's local data with the remote copy.
    ///
    /// Deletes every local row the user owns, downloads everything, and
    /// records the sync. Nothing is uploaded.
    pub async fn restore_from_cloud(&self) -> SyncOutcome {
        let _pass = self.pass_lock.lock().await;
        let Some(user_id) = self.auth.current_user_id() else {
            tracing::warn!("Restore requested without a signed-in user");
            return SyncOutcome::Error(SyncError::NotAuthenticated.to_string());
        };

        finish("restore", self.run_restore(&user_id).await)
    }

    /// Download the shared exercise catalogue. Needs no signed-in user.
    pub async fn sync_system_reference_data(&self) -> SyncOutcome {
        let _pass = self.pass_lock.lock().await;
        let result = SystemExerciseStrategy
            .download_and_merge(&self.local, &self.remote, None, None)
            .await
            .map(|stats| {
                log_step(SystemExerciseStrategy.name(), stats);
                Utc::now()
            });
        log_outcome("system reference sync", SyncOutcome::from(result))
    }

    async fn run_user_pass(&self, user_id: &str) -> SyncResult<SyncMetadata> {
        tracing::info!(user_id, "Starting sync pass");

        let local_workouts = self
            .local
            .count_for_user::<Workout>(user_id)
            .await
            .map_err(SyncError::local("count local workouts"))?;
        let metadata = self
            .remote
            .get_sync_metadata(user_id)
            .await
            .map_err(SyncError::remote("read sync metadata"))?;

        let since = match metadata {
            Some(metadata) if local_workouts > 0 => Some(metadata.last_sync_time),
            Some(metadata) => {
                tracing::info!(
                    user_id,
                    last_sync = %metadata.last_sync_time,
                    "Local store is empty; downloading everything"
                );
                None
            }
            None => None,
        };

        self.download_phase(user_id, since).await?;
        self.upload_phase(user_id).await?;
        self.record_sync(user_id).await
    }

    async fn run_restore(&self, user_id: &str) -> SyncResult<SyncMetadata> {
        tracing::info!(user_id, "Restoring local data from cloud");

        // Children first so foreign keys never block a delete
        for kind in EntityKind::ALL.into_iter().rev() {
            let removed =
                with_entity_type!(kind, T => self.local.delete_all_for_user::<T>(user_id).await)
                    .map_err(SyncError::local(format!("clear local {kind}")))?;
            if removed > 0 {
                tracing::debug!(%kind, removed, "Cleared local rows");
            }
        }

        self.download_phase(user_id, None).await?;
        self.record_sync(user_id).await
    }

    /// Merge remote changes in dependency order; the first failure aborts.
    async fn download_phase(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> SyncResult<()> {
        let stats = SystemExerciseStrategy
            .download_and_merge(&self.local, &self.remote, None, since)
            .await?;
        log_step(SystemExerciseStrategy.name(), stats);

        let stats = CustomExerciseStrategy
            .download_and_merge(&self.local, &self.remote, Some(user_id), since)
            .await?;
        log_step(CustomExerciseStrategy.name(), stats);

        for kind in EntityKind::ALL {
            if kind == EntityKind::Exercise {
                continue;
            }
            let stats =
                with_entity_type!(kind, T => self.download_step::<T>(user_id, since).await)?;
            log_step(kind.table_name(), stats);
        }
        Ok(())
    }

    async fn download_step<T: SyncEntity>(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> SyncResult<MergeStats> {
        let download = download_entities::<R, T>(
            &self.remote,
            Some(user_id),
            T::KIND.collection(),
            since,
        )
        .await
        .map_err(SyncError::remote(format!("download {}", T::KIND)))?;

        // Documents under the user's collections belong to that user
        let mut rows = download.rows;
        for row in rows.iter_mut().filter(|row| row.user_id().is_none()) {
            row.set_user_id(Some(user_id.to_string()));
        }

        let mut stats = merge_rows(&self.local, Some(user_id), rows)
            .await
            .map_err(SyncError::local(format!("merge {}", T::KIND)))?;
        stats.malformed += download.malformed;
        Ok(stats)
    }

    /// Push the user's full local state, one entity type at a time.
    async fn upload_phase(&self, user_id: &str) -> SyncResult<()> {
        for kind in EntityKind::ALL {
            let uploaded = with_entity_type!(kind, T => self.upload_step::<T>(user_id).await)?;
            if uploaded > 0 {
                tracing::debug!(%kind, uploaded, "Uploaded local rows");
            }
        }
        Ok(())
    }

    async fn upload_step<T: SyncEntity>(&self, user_id: &str) -> SyncResult<usize> {
        let rows = self
            .local
            .get_all::<T>(user_id)
            .await
            .map_err(SyncError::local(format!("read local {}", T::KIND)))?;
        upload_entities(&self.remote, user_id, T::KIND.collection(), &rows)
            .await
            .map_err(SyncError::remote(format!("upload {}", T::KIND)))
    }

    async fn record_sync(&self, user_id: &str) -> SyncResult<SyncMetadata> {
        self.remote
            .update_sync_metadata(user_id, &self.device.device_id, &self.device.device_name)
            .await
            .map_err(SyncError::remote("update sync metadata"))
    }
}

fn log_step(step: &str, stats: MergeStats) {
    if stats.total() == 0 {
        return;
    }
    tracing::info!(
        step,
        inserted = stats.inserted,
        updated = stats.updated,
        kept = stats.kept,
        malformed = stats.malformed,
        "Merged remote rows"
    );
}

fn finish(operation: &str, result: SyncResult<SyncMetadata>) -> SyncOutcome {
    log_outcome(
        operation,
        SyncOutcome::from(result.map(|metadata| metadata.last_sync_time)),
    )
}

fn log_outcome(operation: &str, outcome: SyncOutcome) -> SyncOutcome {
    match &outcome {
        SyncOutcome::Success(at) => tracing::info!(operation, synced_at = %at, "Sync finished"),
        SyncOutcome::Error(message) => tracing::error!(operation, error = %message, "Sync failed"),
        SyncOutcome::Skipped(reason) => tracing::info!(operation, %reason, "Sync skipped"),
    }
    outcome
}
