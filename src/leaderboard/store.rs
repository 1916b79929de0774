use async_trait::async_trait;

use crate::models::{LeaderboardRow, Result};

/// External tabular store holding the leaderboard.
///
/// The store only knows whole tables: `write` replaces everything it holds.
/// There is no append or compare-and-swap, so callers doing
/// read-modify-write can lose updates when two writers interleave.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Short name used in logs and error messages
    fn backend_name(&self) -> &'static str;

    /// Read the full table in stored order
    async fn read(&self) -> Result<Vec<LeaderboardRow>>;

    /// Replace the full table
    async fn write(&self, rows: &[LeaderboardRow]) -> Result<()>;
}
