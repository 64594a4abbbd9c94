//! Weighted-utility scoring for RFQ negotiations.
//!
//! A utility in `[0, 1]` is classified against a [`ThresholdConfig`] into one
//! of four zones (accept, counter, escalate, walk away). Parameter utilities
//! are combined by a weighted sum whose weights are percentages and are not
//! renormalized.
//!
//! ```
//! use negoscore::scoring::WeightedUtilityAggregator;
//! use negoscore::types::report::ParameterUtility;
//! use negoscore::types::scoring::Zone;
//!
//! let result = WeightedUtilityAggregator::default().aggregate(vec![
//!     ParameterUtility::new("price", 0.9, 60.0),
//!     ParameterUtility::new("delivery", 0.4, 40.0),
//! ]);
//! assert_eq!(result.total_utility(), 0.70);
//! assert_eq!(result.recommendation(), Zone::Accept);
//! ```
//!
//! [`ThresholdConfig`]: types::config::ThresholdConfig

pub mod config;
pub mod error;
pub mod history;
pub mod report;
pub mod scoring;
pub mod snapshot;
pub mod types;
pub mod view;
