pub mod store;
pub mod memory;
pub mod sqlite;
pub mod sheet;
pub mod board;
pub mod unavailable;

pub use store::LeaderboardStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use sheet::SheetStore;
pub use board::{rank_rows, Leaderboard, PendingSubmission};
pub use unavailable::UnavailableStore;

use std::sync::Arc;
use tracing::warn;

use crate::config::{LeaderboardSettings, StoreBackend};
use crate::models::{QuestError, Result};

/// Build the store selected by `backend`, using `settings` for its parameters.
pub async fn open_store(
    backend: StoreBackend,
    settings: &LeaderboardSettings,
) -> Result<Arc<dyn LeaderboardStore>> {
    let store: Arc<dyn LeaderboardStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sqlite => Arc::new(SqliteStore::connect(&settings.sqlite_url).await?),
        StoreBackend::Sheet => {
            let url = settings.sheet_url.as_deref().ok_or_else(|| {
                QuestError::Config("leaderboard.sheet_url is not set".to_string())
            })?;
            Arc::new(SheetStore::new(
                url,
                settings.api_token.clone(),
                settings.timeout_seconds,
            )?)
        }
    };
    Ok(store)
}

/// Open the selected store for a [`Leaderboard`]. A store that cannot be
/// opened is replaced by one that fails every call, so reads show an
/// unavailable table and submissions report an error.
pub async fn open_leaderboard(backend: StoreBackend, settings: &LeaderboardSettings) -> Leaderboard {
    match open_store(backend, settings).await {
        Ok(store) => Leaderboard::new(store),
        Err(e) => {
            warn!("Failed to open {} leaderboard: {}", backend.as_str(), e);
            Leaderboard::new(Arc::new(UnavailableStore::new(backend.as_str(), &e.to_string())))
        }
    }
}
