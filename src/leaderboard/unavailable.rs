use async_trait::async_trait;

use crate::leaderboard::LeaderboardStore;
use crate::models::{LeaderboardRow, QuestError, Result};

/// Stand-in for a store that could not be opened. Every call fails with the
/// reason it could not be opened.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    backend: &'static str,
    reason: String,
}

impl UnavailableStore {
    pub fn new(backend: &'static str, reason: &str) -> Self {
        Self {
            backend,
            reason: reason.to_string(),
        }
    }

    fn error(&self) -> QuestError {
        QuestError::Store {
            backend: self.backend.to_string(),
            message: self.reason.clone(),
        }
    }
}

#[async_trait]
impl LeaderboardStore for UnavailableStore {
    fn backend_name(&self) -> &'static str {
        self.backend
    }

    async fn read(&self) -> Result<Vec<LeaderboardRow>> {
        Err(self.error())
    }

    async fn write(&self, _rows: &[LeaderboardRow]) -> Result<()> {
        Err(self.error())
    }
}
