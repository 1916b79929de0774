use crate::models::{ActionCatalog, ActivityRecord, BreakdownEntry, ScoreBreakdown, ScoreSummary};

/// Turns per-action counts into points using a fixed catalog.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    catalog: ActionCatalog,
}

impl ScoreAggregator {
    pub fn new(catalog: ActionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn aggregate(&self, record: &ActivityRecord) -> ScoreSummary {
        let mut breakdown = ScoreBreakdown::default();
        let mut total = 0u64;

        for action in self.catalog.iter() {
            let count = record.count(&action.key);
            // u32 x u32 always fits in u64; only the running sum can overflow.
            let subtotal = u64::from(count) * u64::from(action.points);
            total = total.saturating_add(subtotal);

            if subtotal > 0 {
                breakdown.push(BreakdownEntry {
                    key: action.key.clone(),
                    label: action.label.clone(),
                    count,
                    points: subtotal,
                });
            }
        }

        ScoreSummary { total, breakdown }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(ActionCatalog::default())
    }
}
