use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // Readers never block the writer; writers queue on the lock.
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates the member and attendance tables. Safe to run against an
/// already-initialized database.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            team_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS checkin_checkout (
            id INTEGER PRIMARY KEY,
            member_id INTEGER NOT NULL UNIQUE,
            check_in TIMESTAMP,
            check_out TIMESTAMP,
            FOREIGN KEY (member_id) REFERENCES members (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// In-memory pool for tests. A single connection that is never reaped, since
/// every new SQLite memory connection starts from an empty database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    init_schema(&pool).await.expect("Failed to create schema");
    pool
}

/// Multi-connection pool on a database file inside `dir`, for tests whose
/// calls must really overlap.
#[cfg(test)]
pub async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("members.db").display());
    let pool = init_db(&url, 8)
        .await
        .expect("Failed to open file database");

    init_schema(&pool).await.expect("Failed to create schema");
    pool
}
