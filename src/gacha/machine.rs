use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{default_items, GachaItem, GachaPull, QuestError, Result};

/// Draws one reward uniformly from a fixed catalog. Rarity is a label only
/// and does not weight the draw.
#[derive(Debug, Clone)]
pub struct GachaMachine {
    items: Vec<GachaItem>,
}

impl GachaMachine {
    pub fn new(items: Vec<GachaItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(QuestError::Config("gacha catalog is empty".to_string()));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[GachaItem] {
        &self.items
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> GachaPull {
        let item = self
            .items
            .choose(rng)
            .expect("gacha catalog is non-empty by construction")
            .clone();
        GachaPull {
            item,
            drawn_at: Utc::now(),
        }
    }
}

impl Default for GachaMachine {
    fn default() -> Self {
        Self {
            items: default_items(),
        }
    }
}

/// Every pull of the session, oldest first. Displays read the tail through
/// [`GachaHistory::recent`].
#[derive(Debug, Clone, Default)]
pub struct GachaHistory {
    pulls: Vec<GachaPull>,
}

impl GachaHistory {
    pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pull: GachaPull) {
        self.pulls.push(pull);
    }

    /// Up to `limit` pulls, most recent first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &GachaPull> {
        self.pulls.iter().rev().take(limit)
    }

    pub fn last(&self) -> Option<&GachaPull> {
        self.pulls.last()
    }

    pub fn len(&self) -> usize {
        self.pulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulls.is_empty()
    }
}
