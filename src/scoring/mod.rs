pub mod aggregate;
pub mod evaluation;
pub mod scorer;

pub use aggregate::WeightedUtilityAggregator;
pub use evaluation::{slider_to_utility, Evaluation};
pub use scorer::{classify, percentage, UtilityScorer};
