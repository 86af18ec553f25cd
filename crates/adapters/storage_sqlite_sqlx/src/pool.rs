//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:catpoint.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// An opened, migrated catpoint database.
///
/// After [`Config::build`] returns, the `system_status` row exists, so the
/// repository never has to handle a missing arming or alarm status.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(%database_url, "database ready");

        Ok(Self { pool })
    }

    /// Pool to hand to [`SqliteSecurityRepository::new`](crate::SqliteSecurityRepository::new).
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_rows(pool: &SqlitePool) -> Vec<(String, String)> {
        sqlx::query_as("SELECT arming_status, alarm_status FROM system_status")
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_security_schema_with_seeded_status_when_using_memory_db() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();

        assert_eq!(names, vec!["sensors", "system_status"]);
        assert_eq!(
            status_rows(db.pool()).await,
            vec![("disarmed".to_string(), "no_alarm".to_string())]
        );
    }

    #[tokio::test]
    async fn should_keep_status_when_database_file_reopened() {
        let path = std::env::temp_dir().join(format!(
            "catpoint-{}.db",
            catpoint_domain::id::SensorId::new()
        ));
        let url = format!("sqlite:{}", path.display());

        let first = Config {
            database_url: url.clone(),
        }
        .build()
        .await
        .unwrap();
        sqlx::query("UPDATE system_status SET arming_status = 'armed_away', alarm_status = 'alarm'")
            .execute(first.pool())
            .await
            .unwrap();
        first.pool().close().await;

        let second = Config { database_url: url }.build().await.unwrap();
        let rows = status_rows(second.pool()).await;
        second.pool().close().await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            rows,
            vec![("armed_away".to_string(), "alarm".to_string())]
        );
    }
}
