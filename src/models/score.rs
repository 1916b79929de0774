use serde::{Deserialize, Serialize};

/// Points contributed by one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub key: String,
    pub label: String,
    pub count: u32,
    pub points: u64,
}

/// Per-action contributions in catalog order. Only positive contributions are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    entries: Vec<BreakdownEntry>,
}

impl ScoreBreakdown {
    pub(crate) fn push(&mut self, entry: BreakdownEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreakdownEntry> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.points)
    }

    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |sum, e| sum.saturating_add(e.points))
    }

    /// Share of the total for each entry, for pie-style displays.
    pub fn shares(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|e| (e.label.as_str(), e.points as f64 / total as f64))
            .collect()
    }

    /// Entries ordered by points, highest first. Ties keep catalog order.
    pub fn ranked(&self) -> Vec<&BreakdownEntry> {
        let mut ranked: Vec<&BreakdownEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: u64,
    pub breakdown: ScoreBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, points: u64) -> BreakdownEntry {
        BreakdownEntry {
            key: key.to_string(),
            label: key.to_string(),
            count: 1,
            points,
        }
    }

    #[test]
    fn test_ranked_orders_by_points_and_keeps_ties_stable() {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.push(entry("web_test", 10));
        breakdown.push(entry("interview", 60));
        breakdown.push(entry("info_session", 10));

        let keys: Vec<&str> = breakdown.ranked().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["interview", "web_test", "info_session"]);
    }

    #[test]
    fn test_empty_breakdown_has_no_shares() {
        let breakdown = ScoreBreakdown::default();
        assert!(breakdown.shares().is_empty());
        assert!(breakdown.ranked().is_empty());
        assert_eq!(breakdown.total(), 0);
    }
}
