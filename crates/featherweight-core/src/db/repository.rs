//! Entity storage: one table per synced model, generic over [`SyncEntity`].

use libsql::params::Params;
use libsql::{Connection, Value};

use crate::error::Result;
use crate::sync::{EntityKind, SyncEntity};

/// Typed per-entity operations the sync layer performs on the local store
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    /// All rows owned by `user_id`
    async fn get_all<T: SyncEntity>(&self, user_id: &str) -> Result<Vec<T>>;

    /// Rows without an owner (shared reference data or local-only rows)
    async fn get_unowned<T: SyncEntity>(&self) -> Result<Vec<T>>;

    async fn get_by_id<T: SyncEntity>(&self, id: &str) -> Result<Option<T>>;

    /// Insert a new row; fails if the id already exists
    async fn insert<T: SyncEntity>(&self, entity: &T) -> Result<()>;

    /// Insert, or update the existing row in place
    async fn upsert<T: SyncEntity>(&self, entity: &T) -> Result<()>;

    /// Delete one row, returning whether it existed
    async fn delete_by_id<T: SyncEntity>(&self, id: &str) -> Result<bool>;

    /// Delete every row owned by `user_id`, returning how many were removed
    async fn delete_all_for_user<T: SyncEntity>(&self, user_id: &str) -> Result<u64>;

    async fn count_for_user<T: SyncEntity>(&self, user_id: &str) -> Result<u64>;
}

/// Result of undoing a logged set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetLogDeletion {
    pub personal_records: u64,
    pub one_rm_history: u64,
    pub set_removed: bool,
}

/// libSQL implementation of `LocalStore`
#[derive(Clone)]
pub struct LibSqlStore {
    conn: Connection,
}

impl LibSqlStore {
    /// Create a new store with the given connection
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Rows of `kind` owned by `user_id`, without decoding them
    pub async fn count_kind_for_user(&self, kind: EntityKind, user_id: &str) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE user_id = ?",
            kind.table_name()
        );
        let mut rows = self.conn.query(&sql, [user_id]).await?;
        let count: i64 = match rows.next().await? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Delete a set log together with every record derived from it.
    ///
    /// Personal records and 1RM history rows whose `source_set_id` is the set
    /// are removed first, then the set, in one transaction.
    pub async fn delete_set_log_with_records(&self, set_id: &str) -> Result<SetLogDeletion> {
        self.conn.execute("BEGIN TRANSACTION", ()).await?;

        match self.delete_set_log_rows(set_id).await {
            Ok(deletion) => {
                if let Err(e) = self.conn.execute("COMMIT", ()).await {
                    self.conn.execute("ROLLBACK", ()).await.ok();
                    return Err(e.into());
                }
                tracing::debug!(
                    set_id,
                    personal_records = deletion.personal_records,
                    one_rm_history = deletion.one_rm_history,
                    "Deleted set log with derived records"
                );
                Ok(deletion)
            }
            Err(e) => {
                self.conn.execute("ROLLBACK", ()).await.ok();
                Err(e)
            }
        }
    }

    async fn delete_set_log_rows(&self, set_id: &str) -> Result<SetLogDeletion> {
        let personal_records = self
            .conn
            .execute(
                "DELETE FROM personal_records WHERE source_set_id = ?",
                [set_id],
            )
            .await?;
        let one_rm_history = self
            .conn
            .execute("DELETE FROM one_rm_history WHERE source_set_id = ?", [set_id])
            .await?;
        let removed = self
            .conn
            .execute("DELETE FROM set_logs WHERE id = ?", [set_id])
            .await?;

        Ok(SetLogDeletion {
            personal_records,
            one_rm_history,
            set_removed: removed > 0,
        })
    }

    async fn query_entities<T: SyncEntity>(&self, sql: &str, params: Params) -> Result<Vec<T>> {
        let mut rows = self.conn.query(sql, params).await?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next().await? {
            let data: String = row.get(0)?;
            entities.push(serde_json::from_str(&data)?);
        }
        Ok(entities)
    }

    async fn write<T: SyncEntity>(&self, entity: &T, on_conflict_update: bool) -> Result<()> {
        let (sql, params) = write_statement(entity, on_conflict_update)?;
        self.conn.execute(&sql, params).await?;
        Ok(())
    }
}

impl LocalStore for LibSqlStore {
    async fn get_all<T: SyncEntity>(&self, user_id: &str) -> Result<Vec<T>> {
        let sql = format!(
            "SELECT data FROM {} WHERE user_id = ? ORDER BY rowid",
            T::KIND.table_name()
        );
        self.query_entities(&sql, Params::Positional(vec![text(user_id)]))
            .await
    }

    async fn get_unowned<T: SyncEntity>(&self) -> Result<Vec<T>> {
        let sql = format!(
            "SELECT data FROM {} WHERE user_id IS NULL ORDER BY rowid",
            T::KIND.table_name()
        );
        self.query_entities(&sql, Params::None).await
    }

    async fn get_by_id<T: SyncEntity>(&self, id: &str) -> Result<Option<T>> {
        let sql = format!("SELECT data FROM {} WHERE id = ?", T::KIND.table_name());
        let mut entities = self
            .query_entities(&sql, Params::Positional(vec![text(id)]))
            .await?;
        Ok(entities.pop())
    }

    async fn insert<T: SyncEntity>(&self, entity: &T) -> Result<()> {
        self.write(entity, false).await
    }

    async fn upsert<T: SyncEntity>(&self, entity: &T) -> Result<()> {
        self.write(entity, true).await
    }

    async fn delete_by_id<T: SyncEntity>(&self, id: &str) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::KIND.table_name());
        Ok(self.conn.execute(&sql, [id]).await? > 0)
    }

    async fn delete_all_for_user<T: SyncEntity>(&self, user_id: &str) -> Result<u64> {
        let sql = format!("DELETE FROM {} WHERE user_id = ?", T::KIND.table_name());
        Ok(self.conn.execute(&sql, [user_id]).await?)
    }

    async fn count_for_user<T: SyncEntity>(&self, user_id: &str) -> Result<u64> {
        self.count_kind_for_user(T::KIND, user_id).await
    }
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

/// Build the INSERT (optionally ON CONFLICT DO UPDATE) for an entity.
///
/// Updating in place keeps the row alive, so `ON DELETE CASCADE` children are
/// never removed by an upsert.
fn write_statement<T: SyncEntity>(entity: &T, on_conflict_update: bool) -> Result<(String, Params)> {
    let keys = entity.key_columns();

    let mut columns = vec!["id", "user_id", "updated_at", "data"];
    columns.extend(keys.iter().map(|key| key.name));

    let mut values = vec![
        text(entity.id()),
        optional_text(entity.user_id()),
        Value::Integer(entity.last_modified()),
        Value::Text(serde_json::to_string(entity)?),
    ];
    values.extend(keys.iter().map(|key| optional_text(key.value)));

    let placeholders = vec!["?"; columns.len()].join(", ");
    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        T::KIND.table_name(),
        columns.join(", ")
    );
    if on_conflict_update {
        let assignments = columns[1..]
            .iter()
            .map(|column| format!("{column} = excluded.{column}"))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(" ON CONFLICT(id) DO UPDATE SET ");
        sql.push_str(&assignments);
    }

    Ok((sql, Params::Positional(values)))
}
