//! Applying downloaded rows to the local store according to each entity's
//! [`MergePolicy`].

use std::collections::HashMap;
use std::ops::AddAssign;

use super::entity::{MergePolicy, SyncEntity};
use crate::db::LocalStore;
use crate::error::Result;

/// What happened to the rows of one download step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    pub inserted: usize,
    pub updated: usize,
    /// Remote rows that lost to (or matched) the local copy
    pub kept: usize,
    /// Remote documents that could not be decoded
    pub malformed: usize,
}

impl MergeStats {
    pub const fn total(&self) -> usize {
        self.inserted + self.updated + self.kept + self.malformed
    }
}

impl AddAssign for MergeStats {
    fn add_assign(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.kept += other.kept;
        self.malformed += other.malformed;
    }
}

/// Merge remote rows owned by `owner` (`None` for unowned reference rows).
///
/// Local rows are matched by id, except for [`MergePolicy::LogicalIdentity`]
/// entities, which are matched by logical key and take the remote id.
pub async fn merge_rows<L, T>(local: &L, owner: Option<&str>, rows: Vec<T>) -> Result<MergeStats>
where
    L: LocalStore,
    T: SyncEntity,
{
    let mut stats = MergeStats::default();
    if rows.is_empty() {
        return Ok(stats);
    }

    let mut by_logical_key: HashMap<String, T> = match T::MERGE_POLICY {
        MergePolicy::LogicalIdentity => logical_index(local, owner).await?,
        _ => HashMap::new(),
    };

    for remote in rows {
        match T::MERGE_POLICY {
            MergePolicy::InsertIfAbsent => {
                if local.get_by_id::<T>(remote.id()).await?.is_some() {
                    stats.kept += 1;
                } else {
                    local.insert(&remote).await?;
                    stats.inserted += 1;
                }
            }
            MergePolicy::Overwrite => {
                let existed = local.get_by_id::<T>(remote.id()).await?.is_some();
                local.upsert(&remote).await?;
                if existed {
                    stats.updated += 1;
                } else {
                    stats.inserted += 1;
                }
            }
            MergePolicy::KeepBetter => match local.get_by_id::<T>(remote.id()).await? {
                None => {
                    local.upsert(&remote).await?;
                    stats.inserted += 1;
                }
                Some(existing) => match T::keep_better(&existing, remote) {
                    Some(better) => {
                        local.upsert(&better).await?;
                        stats.updated += 1;
                    }
                    None => stats.kept += 1,
                },
            },
            MergePolicy::LogicalIdentity => {
                let twin = remote
                    .logical_key()
                    .and_then(|key| by_logical_key.get(&key))
                    .map(|existing| existing.id().to_string());
                let existed = match twin {
                    Some(twin_id) => {
                        // Drop the differently keyed local copy so both sides agree on the id
                        if twin_id != remote.id() {
                            local.delete_by_id::<T>(&twin_id).await?;
                        }
                        true
                    }
                    None => local.get_by_id::<T>(remote.id()).await?.is_some(),
                };
                local.upsert(&remote).await?;
                if existed {
                    stats.updated += 1;
                } else {
                    stats.inserted += 1;
                }
                remember(&mut by_logical_key, remote);
            }
        }
    }

    Ok(stats)
}

async fn logical_index<L, T>(local: &L, owner: Option<&str>) -> Result<HashMap<String, T>>
where
    L: LocalStore,
    T: SyncEntity,
{
    let rows: Vec<T> = match owner {
        Some(user_id) => local.get_all(user_id).await?,
        None => local.get_unowned().await?,
    };
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        remember(&mut index, row);
    }
    Ok(index)
}

fn remember<T: SyncEntity>(index: &mut HashMap<String, T>, row: T) {
    if let Some(key) = row.logical_key() {
        index.insert(key, row);
    }
}
