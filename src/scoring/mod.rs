pub mod aggregator;
pub mod evaluator;

pub use aggregator::ScoreAggregator;
pub use evaluator::RankEvaluator;
