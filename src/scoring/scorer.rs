use crate::types::config::ThresholdConfig;
use crate::types::scoring::{ParameterStatus, Score, Zone};

/// Clamp to `[0, 1]`, mapping NaN to zero.
pub fn clamp_unit(value: Score) -> Score {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Classify a utility value. Each zone includes its lower bound, so a value
/// equal to a threshold lands in the higher zone.
pub fn classify(value: Score, thresholds: &ThresholdConfig) -> Zone {
    let value = clamp_unit(value);
    if value >= thresholds.accept {
        Zone::Accept
    } else if value >= thresholds.escalate {
        Zone::Counter
    } else if value >= thresholds.walk_away {
        Zone::Escalate
    } else {
        Zone::WalkAway
    }
}

pub fn percentage(value: Score) -> Score {
    if value.is_nan() {
        0.0
    } else {
        (value * 100.0).clamp(0.0, 100.0)
    }
}

/// The one classification strategy shared by aggregation, snapshot decoding
/// and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UtilityScorer {
    thresholds: ThresholdConfig,
}

impl UtilityScorer {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn classify(&self, value: Score) -> Zone {
        let zone = classify(value, &self.thresholds);
        tracing::trace!(value, zone = %zone, "classified utility");
        zone
    }

    pub fn status(&self, utility: Score) -> ParameterStatus {
        ParameterStatus::from_zone(self.classify(utility))
    }
}
