use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::leaderboard::LeaderboardStore;
use crate::models::{LeaderboardRow, QuestError, Result};

/// Process-local table. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<Vec<LeaderboardRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<LeaderboardRow>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    fn poisoned() -> QuestError {
        QuestError::Store {
            backend: "memory".to_string(),
            message: "table lock poisoned".to_string(),
        }
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self) -> Result<Vec<LeaderboardRow>> {
        let rows = self.rows.read().map_err(|_| Self::poisoned())?;
        Ok(rows.clone())
    }

    async fn write(&self, rows: &[LeaderboardRow]) -> Result<()> {
        let mut table = self.rows.write().map_err(|_| Self::poisoned())?;
        *table = rows.to_vec();
        Ok(())
    }
}
