use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::models::{
    default_actions, default_items, default_tiers, ActionCatalog, ActionDef, GachaItem,
    OverflowGoal, RankLadder, RankTier,
};
use crate::gacha::GachaMachine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub scoring: ScoringSettings,
    pub ranks: RankSettings,
    pub gacha: GachaSettings,
    pub leaderboard: LeaderboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub actions: Vec<ActionDef>,
    /// Upper bound the input layer accepts for a single count
    pub max_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSettings {
    pub tiers: Vec<RankTier>,
    pub overflow: Option<OverflowGoal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GachaSettings {
    pub items: Vec<GachaItem>,
    pub display_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
    Sheet,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Sheet => "sheet",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Some(StoreBackend::Memory),
            "sqlite" | "db" => Some(StoreBackend::Sqlite),
            "sheet" | "spreadsheet" => Some(StoreBackend::Sheet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub backend: StoreBackend,
    pub sqlite_url: String,
    pub sheet_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Job Hunt Quest".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            scoring: ScoringSettings {
                actions: default_actions(),
                max_count: 100,
            },
            ranks: RankSettings {
                tiers: default_tiers(),
                overflow: None,
            },
            gacha: GachaSettings {
                items: default_items(),
                display_limit: 5,
            },
            leaderboard: LeaderboardSettings {
                backend: StoreBackend::Sqlite,
                sqlite_url: "sqlite://leaderboard.db".to_string(),
                sheet_url: None,
                api_token: None,
                timeout_seconds: 10,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("JOBHUNT_QUEST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn catalog(&self) -> crate::Result<ActionCatalog> {
        ActionCatalog::new(self.scoring.actions.clone())
    }

    pub fn ladder(&self) -> crate::Result<RankLadder> {
        RankLadder::new(self.ranks.tiers.clone(), self.ranks.overflow.clone())
    }

    pub fn gacha_machine(&self) -> crate::Result<GachaMachine> {
        GachaMachine::new(self.gacha.items.clone())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.catalog().map_err(|e| e.to_string())?;
        self.ladder().map_err(|e| e.to_string())?;
        self.gacha_machine().map_err(|e| e.to_string())?;

        if self.scoring.max_count == 0 {
            return Err("Maximum count per action must be at least 1".to_string());
        }

        if self.leaderboard.backend == StoreBackend::Sheet
            && self.leaderboard.sheet_url.as_deref().map_or(true, |u| u.trim().is_empty())
        {
            return Err("Sheet leaderboard backend requires leaderboard.sheet_url".to_string());
        }

        Ok(())
    }
}
