use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use crate::leaderboard::LeaderboardStore;
use crate::models::{LeaderboardRow, Result};

/// Leaderboard table kept in a local sqlite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // A single connection keeps `sqlite::memory:` databases alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS leaderboard (
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                score TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        info!("Opened sqlite leaderboard at {}", url);
        Ok(Self { pool })
    }
}

#[async_trait]
impl LeaderboardStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn read(&self) -> Result<Vec<LeaderboardRow>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT name, score FROM leaderboard ORDER BY position")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(name, score)| LeaderboardRow { name, score })
            .collect())
    }

    async fn write(&self, rows: &[LeaderboardRow]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM leaderboard").execute(&mut *tx).await?;
        for (position, row) in rows.iter().enumerate() {
            sqlx::query("INSERT INTO leaderboard (position, name, score) VALUES (?, ?, ?)")
                .bind(position as i64)
                .bind(&row.name)
                .bind(&row.score)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!("Wrote {} leaderboard rows", rows.len());
        Ok(())
    }
}
