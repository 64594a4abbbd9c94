use crate::scoring::scorer::{clamp_unit, percentage, UtilityScorer};
use crate::types::config::ThresholdConfig;
use crate::types::scoring::{ParameterStatus, Score, Zone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Display-only value attached to a parameter (price, lead time, a yes/no term).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Flag(flag) => write!(f, "{}", if *flag { "yes" } else { "no" }),
            RawValue::Number(number) => write!(f, "{number}"),
            RawValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterUtility {
    pub(crate) parameter_id: String,
    pub(crate) utility: Score,
    pub(crate) weight: Score,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) current_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) target_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<ParameterStatus>,
}

impl ParameterUtility {
    /// Utility is clamped to `[0, 1]` and weight floored at zero.
    pub fn new(parameter_id: impl Into<String>, utility: Score, weight: Score) -> Self {
        Self {
            parameter_id: parameter_id.into(),
            utility: clamp_unit(utility),
            weight: if weight.is_finite() { weight.max(0.0) } else { 0.0 },
            current_value: None,
            target_value: None,
            max_value: None,
            status: None,
        }
    }

    pub fn with_values(
        mut self,
        current: Option<RawValue>,
        target: Option<RawValue>,
        max: Option<RawValue>,
    ) -> Self {
        self.current_value = current;
        self.target_value = target;
        self.max_value = max;
        self
    }

    pub fn with_status(mut self, status: ParameterStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn parameter_id(&self) -> &str {
        &self.parameter_id
    }

    pub fn utility(&self) -> Score {
        self.utility
    }

    pub fn weight(&self) -> Score {
        self.weight
    }

    pub fn current_value(&self) -> Option<&RawValue> {
        self.current_value.as_ref()
    }

    pub fn target_value(&self) -> Option<&RawValue> {
        self.target_value.as_ref()
    }

    pub fn max_value(&self) -> Option<&RawValue> {
        self.max_value.as_ref()
    }

    pub fn status(&self) -> Option<ParameterStatus> {
        self.status
    }

    /// Share of total utility: `utility * (weight / 100)`.
    pub fn contribution(&self) -> Score {
        self.utility * (self.weight / 100.0)
    }
}

/// One evaluation outcome. The recommendation is always derived from the
/// total utility and thresholds at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedUtilityResult {
    total_utility: Score,
    total_utility_percent: Score,
    parameter_utilities: BTreeMap<String, ParameterUtility>,
    thresholds: ThresholdConfig,
    recommendation: Zone,
    recommendation_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluated_at: Option<DateTime<Utc>>,
}

impl WeightedUtilityResult {
    pub(crate) fn derive(
        scorer: &UtilityScorer,
        total_utility: Score,
        total_utility_percent: Option<Score>,
        mut parameter_utilities: BTreeMap<String, ParameterUtility>,
        recommendation_reason: String,
        evaluated_at: Option<DateTime<Utc>>,
    ) -> Self {
        let total_utility = clamp_unit(total_utility);
        for parameter in parameter_utilities.values_mut() {
            if parameter.status.is_none() {
                parameter.status = Some(scorer.status(parameter.utility));
            }
        }
        Self {
            total_utility,
            total_utility_percent: total_utility_percent
                .unwrap_or_else(|| percentage(total_utility)),
            parameter_utilities,
            thresholds: *scorer.thresholds(),
            recommendation: scorer.classify(total_utility),
            recommendation_reason,
            evaluated_at,
        }
    }

    pub fn total_utility(&self) -> Score {
        self.total_utility
    }

    pub fn total_utility_percent(&self) -> Score {
        self.total_utility_percent
    }

    pub fn parameter_utilities(&self) -> &BTreeMap<String, ParameterUtility> {
        &self.parameter_utilities
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn recommendation(&self) -> Zone {
        self.recommendation
    }

    pub fn recommendation_reason(&self) -> &str {
        &self.recommendation_reason
    }

    pub fn evaluated_at(&self) -> Option<DateTime<Utc>> {
        self.evaluated_at
    }

    /// Parameters by weight descending, ties broken by id.
    pub fn ranked_parameters(&self) -> Vec<&ParameterUtility> {
        let mut ranked: Vec<_> = self.parameter_utilities.values().collect();
        ranked.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| a.parameter_id.cmp(&b.parameter_id))
        });
        ranked
    }

    /// SHA-256 of the canonical JSON encoding, hex encoded.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let encoded = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&encoded);
        Ok(format!("{digest:x}"))
    }
}
