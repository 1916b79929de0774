use serde::{Deserialize, Serialize};

use super::{QuestError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    pub name: String,
    pub title: String,
    pub comment: String,
    pub color: String,
    pub min_score: u64,
}

impl RankTier {
    pub fn new(name: &str, title: &str, comment: &str, color: &str, min_score: u64) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            comment: comment.to_string(),
            color: color.to_string(),
            min_score,
        }
    }
}

/// Progress target used once the top tier is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowGoal {
    pub name: String,
    pub threshold: u64,
}

/// Tiers ordered by strictly increasing threshold, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankLadder {
    tiers: Vec<RankTier>,
    overflow: Option<OverflowGoal>,
}

impl RankLadder {
    pub fn new(tiers: Vec<RankTier>, overflow: Option<OverflowGoal>) -> Result<Self> {
        let first = tiers
            .first()
            .ok_or_else(|| QuestError::Config("rank ladder has no tiers".to_string()))?;
        if first.min_score != 0 {
            return Err(QuestError::Config(format!(
                "lowest tier {} must start at 0, got {}",
                first.name, first.min_score
            )));
        }

        for pair in tiers.windows(2) {
            if pair[1].min_score <= pair[0].min_score {
                return Err(QuestError::Config(format!(
                    "tier thresholds must be strictly increasing: {} ({}) follows {} ({})",
                    pair[1].name, pair[1].min_score, pair[0].name, pair[0].min_score
                )));
            }
        }

        if let (Some(goal), Some(top)) = (&overflow, tiers.last()) {
            if goal.threshold <= top.min_score {
                return Err(QuestError::Config(format!(
                    "overflow goal {} ({}) must be above the top tier ({})",
                    goal.name, goal.threshold, top.min_score
                )));
            }
        }

        Ok(Self { tiers, overflow })
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    pub fn overflow(&self) -> Option<&OverflowGoal> {
        self.overflow.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for RankLadder {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            overflow: None,
        }
    }
}

pub fn default_tiers() -> Vec<RankTier> {
    vec![
        RankTier::new("C", "危機", "💀 まずはパソコンを開くところから始めましょう。", "gray", 0),
        RankTier::new("B", "要改善", "⚠️ もう少しギアを上げられます。行動あるのみ！", "blue", 50),
        RankTier::new("A", "合格点", "✅ 順調です。質も意識していきましょう。", "green", 100),
        RankTier::new("S", "トップ層", "✨ 素晴らしい行動量です。自信を持ってください。", "orange", 150),
        RankTier::new("SSS", "神", "🔥 圧倒的です！この調子なら無双できます。", "red", 200),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankProgress {
    pub next_name: String,
    pub next_threshold: u64,
    /// Always within `[0, 1]`.
    pub fraction: f64,
    pub points_needed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankStanding {
    /// Position in the ladder, 0 being the lowest tier.
    pub index: usize,
    pub tier: RankTier,
    /// `None` once the top tier is reached and no overflow goal is set.
    pub progress: Option<RankProgress>,
}

impl RankStanding {
    pub fn is_max_rank(&self) -> bool {
        self.progress.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ladder_is_valid() {
        let ladder = RankLadder::new(default_tiers(), None).unwrap();
        assert_eq!(ladder.len(), 5);
        assert_eq!(ladder.tiers()[1].min_score, 50);
    }

    #[test]
    fn test_ladder_rejects_bad_thresholds() {
        let mut tiers = default_tiers();
        tiers[0].min_score = 10;
        assert!(RankLadder::new(tiers, None).is_err());

        let mut tiers = default_tiers();
        tiers[2].min_score = 50;
        assert!(RankLadder::new(tiers, None).is_err());

        assert!(RankLadder::new(Vec::new(), None).is_err());
    }

    #[test]
    fn test_overflow_goal_must_exceed_top_tier() {
        let goal = OverflowGoal { name: "LEGEND".to_string(), threshold: 200 };
        assert!(RankLadder::new(default_tiers(), Some(goal)).is_err());

        let goal = OverflowGoal { name: "LEGEND".to_string(), threshold: 300 };
        assert!(RankLadder::new(default_tiers(), Some(goal)).is_ok());
    }
}
