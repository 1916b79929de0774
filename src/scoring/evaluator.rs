use crate::models::{RankLadder, RankProgress, RankStanding};

/// Maps a total score onto the rank ladder.
#[derive(Debug, Clone, Default)]
pub struct RankEvaluator {
    ladder: RankLadder,
}

impl RankEvaluator {
    pub fn new(ladder: RankLadder) -> Self {
        Self { ladder }
    }

    pub fn ladder(&self) -> &RankLadder {
        &self.ladder
    }

    pub fn evaluate(&self, total: u64) -> RankStanding {
        let tiers = self.ladder.tiers();

        // The ladder starts at zero, so some tier always matches.
        let index = tiers
            .iter()
            .rposition(|tier| total >= tier.min_score)
            .unwrap_or(0);

        let target = match tiers.get(index + 1) {
            Some(next) => Some((next.name.as_str(), next.min_score)),
            None => self
                .ladder
                .overflow()
                .map(|goal| (goal.name.as_str(), goal.threshold)),
        };

        let progress = target.map(|(name, threshold)| RankProgress {
            next_name: name.to_string(),
            next_threshold: threshold,
            fraction: (total as f64 / threshold as f64).min(1.0),
            points_needed: threshold.saturating_sub(total),
        });

        RankStanding {
            index,
            tier: tiers[index].clone(),
            progress,
        }
    }
}
