use rand::Rng;

use crate::gacha::{GachaHistory, GachaMachine};
use crate::models::{ActivityRecord, GachaPull, QuestError, RankStanding, Result, ScoreSummary};
use crate::scoring::{RankEvaluator, ScoreAggregator};

pub const DEFAULT_MAX_COUNT: u32 = 100;

/// Everything one user sees on their dashboard. Owned by the caller and
/// passed through each interaction; nothing here is global.
#[derive(Debug, Clone)]
pub struct Session {
    aggregator: ScoreAggregator,
    max_count: u32,
    record: ActivityRecord,
    summary: ScoreSummary,
    history: GachaHistory,
}

impl Session {
    pub fn new(aggregator: ScoreAggregator, max_count: u32) -> Self {
        Self {
            aggregator,
            max_count,
            record: ActivityRecord::new(),
            summary: ScoreSummary::default(),
            history: GachaHistory::new(),
        }
    }

    /// Set the count for one action and recompute the whole summary.
    /// Counts above the input ceiling are clamped to it.
    pub fn set_count(&mut self, key: &str, count: u32) -> Result<u32> {
        if !self.aggregator.catalog().contains(key) {
            return Err(QuestError::UnknownAction(key.to_string()));
        }

        let count = count.min(self.max_count);
        self.record.set(key, count);
        self.summary = self.aggregator.aggregate(&self.record);
        Ok(count)
    }

    pub fn reset(&mut self) {
        self.record.clear();
        self.summary = ScoreSummary::default();
    }

    pub fn count(&self, key: &str) -> u32 {
        self.record.count(key)
    }

    pub fn record(&self) -> &ActivityRecord {
        &self.record
    }

    pub fn summary(&self) -> &ScoreSummary {
        &self.summary
    }

    pub fn total(&self) -> u64 {
        self.summary.total
    }

    pub fn rank(&self, evaluator: &RankEvaluator) -> RankStanding {
        evaluator.evaluate(self.summary.total)
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, machine: &GachaMachine, rng: &mut R) -> GachaPull {
        let pull = machine.draw(rng);
        self.history.record(pull.clone());
        pull
    }

    pub fn history(&self) -> &GachaHistory {
        &self.history
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ScoreAggregator::default(), DEFAULT_MAX_COUNT)
    }
}
