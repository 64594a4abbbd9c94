use crate::scoring::scorer::{percentage, UtilityScorer};
use crate::types::config::ThresholdConfig;
use crate::types::report::{ParameterUtility, WeightedUtilityResult};
use crate::types::scoring::{Score, Zone};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Totals are rounded to twelve decimal places before classification, which
/// absorbs summation noise of a few ULPs and nothing coarser.
const TOTAL_PRECISION: Score = 1e12;

/// Weighted sum of contributions. Weights are not renormalized.
pub fn total_utility<'a, I>(parameters: I) -> Score
where
    I: IntoIterator<Item = &'a ParameterUtility>,
{
    let raw: Score = parameters
        .into_iter()
        .map(ParameterUtility::contribution)
        .sum();
    (raw * TOTAL_PRECISION).round() / TOTAL_PRECISION
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedUtilityAggregator {
    scorer: UtilityScorer,
}

impl WeightedUtilityAggregator {
    pub fn new(scorer: UtilityScorer) -> Self {
        Self { scorer }
    }

    pub fn with_thresholds(thresholds: ThresholdConfig) -> Self {
        Self::new(UtilityScorer::new(thresholds))
    }

    pub fn scorer(&self) -> &UtilityScorer {
        &self.scorer
    }

    /// Later entries replace earlier ones with the same id.
    pub fn aggregate<I>(&self, parameters: I) -> WeightedUtilityResult
    where
        I: IntoIterator<Item = ParameterUtility>,
    {
        let parameters: BTreeMap<String, ParameterUtility> = parameters
            .into_iter()
            .map(|parameter| (parameter.parameter_id.clone(), parameter))
            .collect();
        self.aggregate_map(parameters, None)
    }

    pub(crate) fn aggregate_map(
        &self,
        parameters: BTreeMap<String, ParameterUtility>,
        evaluated_at: Option<DateTime<Utc>>,
    ) -> WeightedUtilityResult {
        let total = total_utility(parameters.values());
        let zone = self.scorer.classify(total);
        tracing::debug!(
            parameters = parameters.len(),
            total,
            zone = %zone,
            "aggregated parameter utilities"
        );
        WeightedUtilityResult::derive(
            &self.scorer,
            total,
            None,
            parameters,
            reason_for(total, zone),
            evaluated_at,
        )
    }
}

fn reason_for(total: Score, zone: Zone) -> String {
    format!(
        "Total utility {:.1}% is in the {} zone",
        percentage(total),
        zone.label().to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aggregator() -> WeightedUtilityAggregator {
        WeightedUtilityAggregator::default()
    }

    #[test]
    fn empty_parameter_set_walks_away() {
        let result = aggregator().aggregate(Vec::new());
        assert_eq!(result.total_utility(), 0.0);
        assert_eq!(result.recommendation(), Zone::WalkAway);
        assert!(result.parameter_utilities().is_empty());
    }

    #[test]
    fn single_full_weight_parameter_accepts() {
        let result = aggregator().aggregate(vec![ParameterUtility::new("price", 1.0, 100.0)]);
        assert_eq!(result.total_utility(), 1.0);
        assert_eq!(result.recommendation(), Zone::Accept);
    }

    #[test]
    fn weighted_sum_lands_in_counter() {
        let result = aggregator().aggregate(vec![
            ParameterUtility::new("price", 0.5, 60.0),
            ParameterUtility::new("delivery", 0.8, 40.0),
        ]);
        assert_eq!(result.total_utility(), 0.62);
        assert_eq!(result.recommendation(), Zone::Counter);
    }

    #[test]
    fn total_exactly_at_accept_threshold_accepts() {
        let thresholds = ThresholdConfig::new(0.70, 0.50, 0.30).expect("thresholds are ordered");
        let result = WeightedUtilityAggregator::with_thresholds(thresholds).aggregate(vec![
            ParameterUtility::new("price", 0.9, 60.0),
            ParameterUtility::new("delivery", 0.4, 40.0),
        ]);
        assert_eq!(result.total_utility(), 0.70);
        assert_eq!(result.recommendation(), Zone::Accept);
        assert_eq!(result.thresholds(), &thresholds);
    }

    #[test]
    fn total_just_below_accept_stays_in_counter() {
        let below = ThresholdConfig::default().accept - 1e-10;
        let result = aggregator().aggregate(vec![ParameterUtility::new("price", below, 100.0)]);
        assert!(result.total_utility() < 0.70);
        assert_eq!(result.recommendation(), Zone::Counter);
    }

    #[test]
    fn totals_just_below_each_threshold_keep_the_lower_zone() {
        let thresholds = ThresholdConfig::default();
        for (bound, expected) in [
            (thresholds.escalate, Zone::Escalate),
            (thresholds.walk_away, Zone::WalkAway),
        ] {
            let result =
                aggregator().aggregate(vec![ParameterUtility::new("price", bound - 1e-10, 100.0)]);
            assert_eq!(result.recommendation(), expected);
        }
    }

    #[test]
    fn weights_are_not_renormalized() {
        let result = aggregator().aggregate(vec![
            ParameterUtility::new("price", 1.0, 30.0),
            ParameterUtility::new("delivery", 1.0, 20.0),
        ]);
        assert_eq!(result.total_utility(), 0.5);
        assert_eq!(result.recommendation(), Zone::Counter);
    }

    #[test]
    fn overweight_totals_are_clamped() {
        let result = aggregator().aggregate(vec![
            ParameterUtility::new("price", 1.0, 80.0),
            ParameterUtility::new("delivery", 1.0, 80.0),
        ]);
        assert_eq!(result.total_utility(), 1.0);
        assert_eq!(result.total_utility_percent(), 100.0);
    }

    #[test]
    fn duplicate_ids_keep_the_last_entry() {
        let result = aggregator().aggregate(vec![
            ParameterUtility::new("price", 0.2, 100.0),
            ParameterUtility::new("price", 0.9, 100.0),
        ]);
        assert_eq!(result.parameter_utilities().len(), 1);
        assert_eq!(result.total_utility(), 0.9);
    }

    #[test]
    fn reason_names_the_zone() {
        let result = aggregator().aggregate(vec![ParameterUtility::new("price", 0.4, 100.0)]);
        assert_eq!(
            result.recommendation_reason(),
            "Total utility 40.0% is in the escalate zone"
        );
    }

    proptest! {
        #[test]
        fn aggregate_is_idempotent(
            entries in proptest::collection::vec((0.0..=1.0f64, 0.0..=100.0f64), 0..8)
        ) {
            let parameters: Vec<_> = entries
                .iter()
                .enumerate()
                .map(|(i, (utility, weight))| ParameterUtility::new(format!("p{i}"), *utility, *weight))
                .collect();
            let first = aggregator().aggregate(parameters.clone());
            let second = aggregator().aggregate(parameters);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn total_stays_in_unit_range(
            entries in proptest::collection::vec((-1.0..=2.0f64, 0.0..=200.0f64), 0..8)
        ) {
            let parameters: Vec<_> = entries
                .iter()
                .enumerate()
                .map(|(i, (utility, weight))| ParameterUtility::new(format!("p{i}"), *utility, *weight))
                .collect();
            let result = aggregator().aggregate(parameters);
            prop_assert!((0.0..=1.0).contains(&result.total_utility()));
        }
    }
}
