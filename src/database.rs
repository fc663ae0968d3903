use crate::models::HiddenStoreError;
use crate::repositories::HiddenAuthorStore;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::str::FromStr;

pub const HIDDEN_AUTHORS_KEY: &str = "hiddenAuthorIds";

static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn establish_pool(url: &str) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database url {url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePool::connect_with(opts)
        .await
        .with_context(|| format!("Failed to open database at {url}"))?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

/// Hidden author ids stored as a JSON array under a single key-value row.
#[derive(Debug, Clone)]
pub struct SqliteHiddenStore {
    pool: SqlitePool,
}

impl SqliteHiddenStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn open(url: &str) -> anyhow::Result<Self> {
        let pool = establish_pool(url).await?;
        Ok(Self::new(pool))
    }
}

async fn read_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, sqlx::Error> {
    let row = sqlx::query("SELECT value FROM key_value WHERE key = ?")
        .bind(HIDDEN_AUTHORS_KEY)
        .fetch_optional(conn)
        .await?;

    let Some(row) = row else {
        return Ok(Vec::new());
    };
    let raw: String = row.try_get("value")?;

    match serde_json::from_str::<Vec<i64>>(&raw) {
        Ok(ids) => Ok(ids),
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring malformed hidden author ids");
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl HiddenAuthorStore for SqliteHiddenStore {
    async fn read(&self) -> Result<Vec<i64>, HiddenStoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire hidden store connection")?;
        let ids = read_ids(&mut conn)
            .await
            .context("Failed to read hidden author ids")?;
        Ok(ids)
    }

    async fn append(&self, id: i64) -> Result<(), HiddenStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin hidden store transaction")?;

        let mut ids = read_ids(&mut tx)
            .await
            .context("Failed to read hidden author ids")?;
        if ids.contains(&id) {
            return Ok(());
        }
        ids.push(id);

        let value = serde_json::to_string(&ids).map_err(|err| anyhow!(err))?;
        sqlx::query(
            "INSERT INTO key_value (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(HIDDEN_AUTHORS_KEY)
        .bind(value)
        .execute(&mut *tx)
        .await
        .with_context(|| format!(r#"Failed to hide author with id "{id}""#))?;

        tx.commit()
            .await
            .context("Failed to commit hidden store transaction")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_in(dir: &TempDir) -> SqliteHiddenStore {
        let url = format!("sqlite://{}", dir.path().join("hidden.db").display());
        SqliteHiddenStore::open(&url).await.unwrap()
    }

    #[tokio::test]
    async fn empty_store_reads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_does_not_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        store.append(3).await.unwrap();
        store.append(4).await.unwrap();
        store.append(3).await.unwrap();
        assert_eq!(store.read().await.unwrap(), vec![3, 4]);
    }

    #[tokio::test]
    async fn hidden_ids_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open_in(&dir).await;
            store.append(9).await.unwrap();
            store.pool.close().await;
        }
        let store = open_in(&dir).await;
        assert_eq!(store.read().await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn malformed_value_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir).await;
        sqlx::query("INSERT INTO key_value (key, value) VALUES (?, ?)")
            .bind(HIDDEN_AUTHORS_KEY)
            .bind("not json")
            .execute(&store.pool)
            .await
            .unwrap();

        assert!(store.read().await.unwrap().is_empty());
        store.append(1).await.unwrap();
        assert_eq!(store.read().await.unwrap(), vec![1]);
    }
}
