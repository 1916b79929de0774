pub mod settings;

pub use settings::{
    AppSettings, GachaSettings, LeaderboardSettings, RankSettings, ScoringSettings, Settings,
    StoreBackend,
};
