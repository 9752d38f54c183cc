//! Local key/value preferences (never synced)

use crate::error::Result;
use libsql::Connection;

/// Trait for preference storage operations (async)
#[allow(async_fn_in_trait)]
pub trait PreferencesRepository {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// libSQL implementation of `PreferencesRepository`
pub struct LibSqlPreferencesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlPreferencesRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl PreferencesRepository for LibSqlPreferencesRepository<'_> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT value FROM preferences WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)",
                [key, value],
            )
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?", [key])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_missing_preference_is_none() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = db.preferences();

        assert_eq!(repo.get("device_id").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_set_overwrites_and_remove_clears() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = db.preferences();

        repo.set("device_id", "first").await.unwrap();
        repo.set("device_id", "second").await.unwrap();
        assert_eq!(
            repo.get("device_id").await.unwrap().as_deref(),
            Some("second")
        );

        repo.remove("device_id").await.unwrap();
        assert_eq!(repo.get("device_id").await.unwrap(), None);
    }
}
