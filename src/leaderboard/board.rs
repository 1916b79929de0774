use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use crate::leaderboard::LeaderboardStore;
use crate::models::{
    Availability, LeaderboardEntry, LeaderboardRow, QuestError, Result, Standing, Standings,
};

/// A table read from the store with one new row appended, waiting to be
/// written back.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub entry: LeaderboardEntry,
    pub table: Vec<LeaderboardRow>,
}

pub struct Leaderboard {
    store: Arc<dyn LeaderboardStore>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn LeaderboardStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Current standings. A failed read degrades to an empty table marked
    /// unavailable.
    pub async fn standings(&self) -> Standings {
        match self.store.read().await {
            Ok(rows) => Standings {
                rows: rank_rows(&rows),
                availability: Availability::Fetched,
            },
            Err(e) => {
                warn!("Failed to read leaderboard from {}: {}", self.backend_name(), e);
                Standings {
                    rows: Vec::new(),
                    availability: Availability::Unavailable(e.to_string()),
                }
            }
        }
    }

    /// Read the whole table and append `entry` in memory.
    pub async fn prepare_submission(&self, entry: LeaderboardEntry) -> Result<PendingSubmission> {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(QuestError::InvalidName(entry.name));
        }
        let entry = LeaderboardEntry::new(name, entry.score);

        let mut table = self.store.read().await.map_err(|e| self.store_error(e))?;
        table.push(LeaderboardRow::from(&entry));

        Ok(PendingSubmission { entry, table })
    }

    /// Write the prepared table back, replacing whatever the store holds now.
    pub async fn commit(&self, pending: PendingSubmission) -> Result<LeaderboardEntry> {
        self.store
            .write(&pending.table)
            .await
            .map_err(|e| self.store_error(e))?;

        info!(
            "Submitted {} with {} pt to {} leaderboard",
            pending.entry.name,
            pending.entry.score,
            self.backend_name()
        );
        Ok(pending.entry)
    }

    pub async fn submit(&self, entry: LeaderboardEntry) -> Result<LeaderboardEntry> {
        let pending = self.prepare_submission(entry).await?;
        self.commit(pending).await
    }

    fn store_error(&self, e: QuestError) -> QuestError {
        match e {
            QuestError::Store { .. } => e,
            other => QuestError::Store {
                backend: self.backend_name().to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Sort by numeric score, highest first. Rows whose score cannot be read go
/// last in stored order. Ranks are 1-based and every row is kept.
pub fn rank_rows(rows: &[LeaderboardRow]) -> Vec<Standing> {
    let mut scored: Vec<(&LeaderboardRow, Option<f64>)> =
        rows.iter().map(|row| (row, row.numeric_score())).collect();

    scored.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (row, score))| Standing {
            rank: i + 1,
            name: row.name.clone(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::store::MockLeaderboardStore;
    use crate::leaderboard::MemoryStore;

    fn failing_read_store() -> MockLeaderboardStore {
        let mut store = MockLeaderboardStore::new();
        store.expect_backend_name().returning(|| "mock");
        store.expect_read().returning(|| {
            Err(QuestError::Store {
                backend: "mock".to_string(),
                message: "quota exceeded".to_string(),
            })
        });
        store
    }

    #[test]
    fn test_rank_rows_sorts_descending_and_pushes_invalid_last() {
        let rows = vec![
            LeaderboardRow::new("low", "20"),
            LeaderboardRow::new("broken", "abc"),
            LeaderboardRow::new("high", "150"),
            LeaderboardRow::new("mid", "70.5"),
            LeaderboardRow::new("blank", ""),
        ];

        let standings = rank_rows(&rows);
        let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["high", "mid", "low", "broken", "blank"]);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[4].rank, 5);
        assert_eq!(standings[3].score, None);
    }

    #[test]
    fn test_rank_rows_keeps_duplicate_names() {
        let rows = vec![LeaderboardRow::new("taro", "10"), LeaderboardRow::new("taro", "30")];
        let standings = rank_rows(&rows);

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].score, Some(30.0));
    }

    #[tokio::test]
    async fn test_submit_then_read_round_trip() {
        let board = Leaderboard::new(Arc::new(MemoryStore::new()));
        board.submit(LeaderboardEntry::new("hanako", 135)).await.unwrap();

        let standings = board.standings().await;
        assert!(standings.is_available());
        assert_eq!(standings.rows.len(), 1);
        assert_eq!(standings.rows[0].name, "hanako");
        assert_eq!(standings.rows[0].score, Some(135.0));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let board = Leaderboard::new(Arc::new(MemoryStore::new()));
        let result = board.submit(LeaderboardEntry::new("   ", 10)).await;

        assert!(matches!(result, Err(QuestError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_name_is_trimmed() {
        let store = MemoryStore::new();
        let board = Leaderboard::new(Arc::new(store.clone()));
        board.submit(LeaderboardEntry::new("  jiro ", 10)).await.unwrap();

        assert_eq!(store.read().await.unwrap()[0].name, "jiro");
    }

    #[tokio::test]
    async fn test_interleaved_submissions_lose_an_update() {
        let store = MemoryStore::with_rows(vec![LeaderboardRow::new("existing", "90")]);
        let board = Leaderboard::new(Arc::new(store.clone()));

        // Both writers read the same snapshot before either writes back.
        let first = board.prepare_submission(LeaderboardEntry::new("first", 100)).await.unwrap();
        let second = board.prepare_submission(LeaderboardEntry::new("second", 110)).await.unwrap();
        board.commit(first).await.unwrap();
        board.commit(second).await.unwrap();

        let names: Vec<String> = store.read().await.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["existing", "second"]);
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_unavailable_empty_table() {
        let board = Leaderboard::new(Arc::new(failing_read_store()));
        let standings = board.standings().await;

        assert!(standings.is_empty());
        assert!(matches!(standings.availability, Availability::Unavailable(ref m) if m.contains("quota")));
    }

    #[tokio::test]
    async fn test_read_failure_aborts_submission_without_writing() {
        let mut store = failing_read_store();
        store.expect_write().never();
        let board = Leaderboard::new(Arc::new(store));

        let result = board.submit(LeaderboardEntry::new("taro", 50)).await;
        assert!(matches!(result, Err(QuestError::Store { .. })));
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_store_error() {
        let mut store = MockLeaderboardStore::new();
        store.expect_backend_name().returning(|| "mock");
        store.expect_read().returning(|| Ok(Vec::new()));
        store
            .expect_write()
            .times(1)
            .returning(|_| Err(QuestError::Config("read-only sheet".to_string())));
        let board = Leaderboard::new(Arc::new(store));

        let err = board.submit(LeaderboardEntry::new("taro", 50)).await.unwrap_err();
        match err {
            QuestError::Store { backend, message } => {
                assert_eq!(backend, "mock");
                assert!(message.contains("read-only sheet"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
