//! Decoding of evaluation snapshots produced by the negotiation engine.
//!
//! Everything that crosses this boundary is checked here: non-numeric
//! utilities and weights fail decoding, negative weights and bad thresholds
//! are rejected, out-of-range utilities are clamped. A snapshot is returned
//! whole or not at all.

use crate::error::{Result, ScoreError};
use crate::scoring::scorer::UtilityScorer;
use crate::types::config::ThresholdConfig;
use crate::types::report::{ParameterUtility, RawValue, WeightedUtilityResult};
use crate::types::scoring::{ParameterStatus, Score, Zone};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSnapshot {
    total_utility: Score,
    total_utility_percent: Option<Score>,
    #[serde(default)]
    parameter_utilities: BTreeMap<String, WireParameter>,
    thresholds: Option<ThresholdConfig>,
    recommendation: String,
    #[serde(default)]
    recommendation_reason: String,
    evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireParameter {
    parameter_id: Option<String>,
    utility: Score,
    weight: Score,
    current_value: Option<RawValue>,
    target_value: Option<RawValue>,
    max_value: Option<RawValue>,
    status: Option<ParameterStatus>,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub result: WeightedUtilityResult,
    /// Recommendation the producer sent, before re-derivation.
    pub reported_recommendation: Zone,
    pub warnings: Vec<String>,
}

impl Snapshot {
    pub fn recommendation_mismatch(&self) -> bool {
        self.reported_recommendation != self.result.recommendation()
    }
}

/// Decode a snapshot. `fallback` supplies thresholds when the producer
/// omitted them.
pub fn parse_snapshot(json: &str, fallback: &ThresholdConfig) -> Result<Snapshot> {
    let wire: WireSnapshot = serde_json::from_str(json)?;
    let mut warnings = Vec::new();

    let thresholds = wire.thresholds.unwrap_or(*fallback);
    thresholds.validate()?;
    let scorer = UtilityScorer::new(thresholds);

    let reported_recommendation: Zone = wire.recommendation.parse()?;

    let mut parameters = BTreeMap::new();
    for (key, entry) in wire.parameter_utilities {
        let parameter = decode_parameter(&key, entry, &mut warnings)?;
        parameters.insert(key, parameter);
    }

    if !(0.0..=1.0).contains(&wire.total_utility) {
        tracing::warn!(total_utility = wire.total_utility, "total utility out of range, clamping");
        warnings.push(format!(
            "totalUtility {} is outside [0, 1] and was clamped",
            wire.total_utility
        ));
    }

    let result = WeightedUtilityResult::derive(
        &scorer,
        wire.total_utility,
        wire.total_utility_percent,
        parameters,
        wire.recommendation_reason,
        wire.evaluated_at,
    );

    if result.recommendation() != reported_recommendation {
        tracing::warn!(
            reported = %reported_recommendation,
            derived = %result.recommendation(),
            "snapshot recommendation disagrees with thresholds"
        );
        warnings.push(format!(
            "reported recommendation {} does not match derived {}",
            reported_recommendation,
            result.recommendation()
        ));
    }

    Ok(Snapshot {
        result,
        reported_recommendation,
        warnings,
    })
}

pub fn load_snapshot(path: &Path, fallback: &ThresholdConfig) -> Result<Snapshot> {
    if !path.exists() {
        return Err(ScoreError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_snapshot(&content, fallback).map_err(|e| ScoreError::Snapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn decode_parameter(
    key: &str,
    entry: WireParameter,
    warnings: &mut Vec<String>,
) -> Result<ParameterUtility> {
    if let Some(id) = &entry.parameter_id {
        if id != key {
            return Err(ScoreError::InvalidParameter(format!(
                "entry '{key}' carries mismatched parameterId '{id}'"
            )));
        }
    }
    if !entry.weight.is_finite() || entry.weight < 0.0 {
        return Err(ScoreError::InvalidParameter(format!(
            "'{key}' has negative weight {}",
            entry.weight
        )));
    }
    if !(0.0..=1.0).contains(&entry.utility) {
        tracing::warn!(parameter = key, utility = entry.utility, "utility out of range, clamping");
        warnings.push(format!(
            "'{key}' utility {} is outside [0, 1] and was clamped",
            entry.utility
        ));
    }

    let mut parameter = ParameterUtility::new(key, entry.utility, entry.weight).with_values(
        entry.current_value,
        entry.target_value,
        entry.max_value,
    );
    if let Some(status) = entry.status {
        parameter = parameter.with_status(status);
    }
    Ok(parameter)
}
