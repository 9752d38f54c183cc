//! Database migrations

use crate::error::Result;
use libsql::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 2;

/// Run all pending migrations
pub async fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn).await?;
    if version >= CURRENT_VERSION {
        return Ok(());
    }

    if version < 1 {
        apply(conn, 1, V1_SCHEMA).await?;
    }
    if version < 2 {
        apply(conn, 2, V2_LOOKUP_INDEXES).await?;
    }

    Ok(())
}

/// Get the current schema version
async fn get_version(conn: &Connection) -> Result<i32> {
    let mut rows = conn
        .query(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            (),
        )
        .await?;

    let exists: bool = if let Some(row) = rows.next().await? {
        row.get::<i32>(0)? != 0
    } else {
        false
    };

    if !exists {
        return Ok(0);
    }

    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM schema_version", ())
        .await?;

    let version: i32 = if let Some(row) = rows.next().await? {
        row.get(0)?
    } else {
        0
    };

    Ok(version)
}

/// Run one version's statements in a transaction and record the version.
async fn apply(conn: &Connection, version: i32, statements: &[&str]) -> Result<()> {
    conn.execute("BEGIN TRANSACTION", ()).await?;

    for stmt in statements {
        if let Err(e) = conn.execute(stmt, ()).await {
            conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }
    }

    if let Err(e) = conn
        .execute("INSERT INTO schema_version (version) VALUES (?)", [version])
        .await
    {
        conn.execute("ROLLBACK", ()).await.ok();
        return Err(e.into());
    }

    if let Err(e) = conn.execute("COMMIT", ()).await {
        conn.execute("ROLLBACK", ()).await.ok();
        return Err(e.into());
    }

    tracing::info!("Migrated database to version {version}");
    Ok(())
}

// Every synced table stores the model as JSON in `data` next to the columns
// the database needs to enforce references and answer lookups.
const V1_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS exercises (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS programmes (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS programme_weeks (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        programme_id TEXT NOT NULL REFERENCES programmes(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS programme_workouts (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        week_id TEXT NOT NULL REFERENCES programme_weeks(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS programme_progress (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        programme_id TEXT NOT NULL REFERENCES programmes(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS workouts (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        programme_id TEXT REFERENCES programmes(id)
    )",
    "CREATE TABLE IF NOT EXISTS exercise_logs (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
        exercise_id TEXT NOT NULL REFERENCES exercises(id)
    )",
    "CREATE TABLE IF NOT EXISTS set_logs (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_log_id TEXT NOT NULL REFERENCES exercise_logs(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS workout_templates (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS template_exercises (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        template_id TEXT NOT NULL REFERENCES workout_templates(id) ON DELETE CASCADE,
        exercise_id TEXT NOT NULL REFERENCES exercises(id)
    )",
    "CREATE TABLE IF NOT EXISTS template_sets (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        template_exercise_id TEXT NOT NULL REFERENCES template_exercises(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS exercise_maxes (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_id TEXT NOT NULL REFERENCES exercises(id)
    )",
    "CREATE TABLE IF NOT EXISTS personal_records (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_id TEXT NOT NULL REFERENCES exercises(id),
        source_set_id TEXT
    )",
    "CREATE TABLE IF NOT EXISTS one_rm_history (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_id TEXT NOT NULL REFERENCES exercises(id),
        source_set_id TEXT
    )",
    "CREATE TABLE IF NOT EXISTS exercise_usage (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_id TEXT NOT NULL REFERENCES exercises(id)
    )",
    "CREATE TABLE IF NOT EXISTS exercise_swap_history (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        original_exercise_id TEXT NOT NULL REFERENCES exercises(id),
        swapped_to_exercise_id TEXT NOT NULL REFERENCES exercises(id),
        workout_id TEXT REFERENCES workouts(id)
    )",
    "CREATE TABLE IF NOT EXISTS exercise_performance (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_id TEXT NOT NULL REFERENCES exercises(id),
        workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS global_exercise_progress (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL,
        exercise_id TEXT NOT NULL REFERENCES exercises(id)
    )",
    "CREATE TABLE IF NOT EXISTS training_analyses (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS parse_requests (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        updated_at INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
    // Preferences table (local only)
    "CREATE TABLE IF NOT EXISTS preferences (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )",
];

/// Per-user lookups run on every sync step; set undo looks up by source set.
const V2_LOOKUP_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_exercises_user ON exercises(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_programmes_user ON programmes(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_programme_weeks_user ON programme_weeks(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_programme_workouts_user ON programme_workouts(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_programme_progress_user ON programme_progress(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_logs_user ON exercise_logs(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_logs_workout ON exercise_logs(workout_id)",
    "CREATE INDEX IF NOT EXISTS idx_set_logs_user ON set_logs(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_set_logs_exercise_log ON set_logs(exercise_log_id)",
    "CREATE INDEX IF NOT EXISTS idx_workout_templates_user ON workout_templates(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_template_exercises_user ON template_exercises(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_template_sets_user ON template_sets(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_maxes_user ON exercise_maxes(user_id, exercise_id)",
    "CREATE INDEX IF NOT EXISTS idx_personal_records_user ON personal_records(user_id, exercise_id)",
    "CREATE INDEX IF NOT EXISTS idx_personal_records_source_set ON personal_records(source_set_id)",
    "CREATE INDEX IF NOT EXISTS idx_one_rm_history_user ON one_rm_history(user_id, exercise_id)",
    "CREATE INDEX IF NOT EXISTS idx_one_rm_history_source_set ON one_rm_history(source_set_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_usage_user ON exercise_usage(user_id, exercise_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_swap_history_user ON exercise_swap_history(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_performance_user ON exercise_performance(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_global_exercise_progress_user ON global_exercise_progress(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_training_analyses_user ON training_analyses(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_parse_requests_user ON parse_requests(user_id)",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::EntityKind;
    use libsql::Builder;

    async fn memory_connection() -> Connection {
        let db = Builder::new_local(":memory:").build().await.unwrap();
        db.connect().unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_migrations_reach_current_version() {
        let conn = memory_connection().await;
        run(&conn).await.unwrap();
        assert_eq!(get_version(&conn).await.unwrap(), CURRENT_VERSION);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_migrations_are_idempotent() {
        let conn = memory_connection().await;
        run(&conn).await.unwrap();
        run(&conn).await.unwrap();
        assert_eq!(get_version(&conn).await.unwrap(), CURRENT_VERSION);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_every_entity_kind_has_a_table() {
        let conn = memory_connection().await;
        run(&conn).await.unwrap();

        for kind in EntityKind::ALL {
            let mut rows = conn
                .query(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?",
                    [kind.table_name()],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap().unwrap();
            let count: i64 = row.get(0).unwrap();
            assert_eq!(count, 1, "missing table for {kind}");
        }
    }
}
