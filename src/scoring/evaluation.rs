use crate::error::{Result, ScoreError};
use crate::scoring::aggregate::WeightedUtilityAggregator;
use crate::scoring::scorer::clamp_unit;
use crate::types::report::{ParameterUtility, WeightedUtilityResult};
use crate::types::scoring::Score;
use std::collections::BTreeMap;

/// Convert a slider position into a utility: `raw / scale`, clamped.
/// A 0-10 slider uses scale 10; a 0-1 slider uses scale 1.
pub fn slider_to_utility(raw: Score, scale: Score) -> Score {
    if !scale.is_finite() || scale <= 0.0 {
        return clamp_unit(raw);
    }
    clamp_unit(raw / scale)
}

/// Live view state seeded from one snapshot.
///
/// The seed result is shown until a parameter changes; every change
/// re-aggregates the full parameter set. The round's `evaluated_at` is kept
/// across changes. The producer's reason is replaced by a generated one,
/// since it no longer describes the recomputed total.
#[derive(Debug, Clone)]
pub struct Evaluation {
    aggregator: WeightedUtilityAggregator,
    parameters: BTreeMap<String, ParameterUtility>,
    current: WeightedUtilityResult,
}

impl Evaluation {
    pub fn new<I>(aggregator: WeightedUtilityAggregator, parameters: I) -> Self
    where
        I: IntoIterator<Item = ParameterUtility>,
    {
        let current = aggregator.aggregate(parameters);
        Self {
            aggregator,
            parameters: current.parameter_utilities().clone(),
            current,
        }
    }

    pub fn from_result(result: WeightedUtilityResult) -> Self {
        Self {
            aggregator: WeightedUtilityAggregator::with_thresholds(*result.thresholds()),
            parameters: result.parameter_utilities().clone(),
            current: result,
        }
    }

    pub fn result(&self) -> &WeightedUtilityResult {
        &self.current
    }

    pub fn into_result(self) -> WeightedUtilityResult {
        self.current
    }

    pub fn set_utility(
        &mut self,
        parameter_id: &str,
        utility: Score,
    ) -> Result<&WeightedUtilityResult> {
        let parameter = self
            .parameters
            .get_mut(parameter_id)
            .ok_or_else(|| ScoreError::UnknownParameter(parameter_id.to_string()))?;
        parameter.utility = clamp_unit(utility);
        parameter.status = None;
        tracing::debug!(parameter_id, utility = parameter.utility, "parameter utility updated");

        self.current = self
            .aggregator
            .aggregate_map(self.parameters.clone(), self.current.evaluated_at());
        self.parameters = self.current.parameter_utilities().clone();
        Ok(&self.current)
    }

    pub fn set_slider(
        &mut self,
        parameter_id: &str,
        raw: Score,
        scale: Score,
    ) -> Result<&WeightedUtilityResult> {
        self.set_utility(parameter_id, slider_to_utility(raw, scale))
    }
}
