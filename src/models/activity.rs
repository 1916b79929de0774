use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{QuestError, Result};

/// A single loggable job-hunting action and what it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub key: String,
    pub label: String,
    pub points: u32,
}

impl ActionDef {
    pub fn new(key: &str, label: &str, points: u32) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            points,
        }
    }
}

/// Ordered, fixed set of actions. Built once at startup and never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCatalog {
    actions: Vec<ActionDef>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<ActionDef>) -> Result<Self> {
        if actions.is_empty() {
            return Err(QuestError::Config("action catalog is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for action in &actions {
            if !seen.insert(action.key.as_str()) {
                return Err(QuestError::Config(format!(
                    "duplicate action key: {}",
                    action.key
                )));
            }
            if action.points == 0 {
                return Err(QuestError::Config(format!(
                    "action {} must be worth at least one point",
                    action.key
                )));
            }
        }

        Ok(Self { actions })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self {
            actions: default_actions(),
        }
    }
}

pub fn default_actions() -> Vec<ActionDef> {
    vec![
        ActionDef::new("interview", "面接（本番）", 30),
        ActionDef::new("entry_sheet", "ES提出（1社）", 20),
        ActionDef::new("case_study", "ケース問題（1問完答）", 20),
        ActionDef::new("ob_og_visit", "OB/OG訪問", 15),
        ActionDef::new("web_test", "Webテスト受検", 10),
        ActionDef::new("info_session", "説明会参加", 10),
        ActionDef::new("industry_research", "業界研究・ニュース", 5),
        ActionDef::new("self_analysis", "自己分析・振り返り", 5),
    ]
}

/// Per-action counts for the current period. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    counts: HashMap<String, u32>,
}

impl ActivityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut record = Self::new();
        for (key, count) in pairs {
            record.set(key, count);
        }
        record
    }

    pub fn set(&mut self, key: &str, count: u32) {
        self.counts.insert(key.to_string(), count);
    }

    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
