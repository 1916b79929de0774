pub mod models;
pub mod config;
pub mod scoring;
pub mod gacha;
pub mod leaderboard;
pub mod session;

pub use models::{
    ActionCatalog, ActivityRecord, LeaderboardEntry, QuestError, RankStanding, Result,
    ScoreSummary,
};
pub use config::Settings;
pub use scoring::{RankEvaluator, ScoreAggregator};
pub use gacha::{GachaHistory, GachaMachine};
pub use leaderboard::{Leaderboard, LeaderboardStore};
pub use session::Session;
