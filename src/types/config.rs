use crate::error::ScoreError;
use crate::types::scoring::Score;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCEPT: Score = 0.70;
pub const DEFAULT_ESCALATE: Score = 0.50;
pub const DEFAULT_WALK_AWAY: Score = 0.30;
pub const DEFAULT_SLIDER_SCALE: Score = 10.0;

/// Lower bounds of the accept, counter and escalate zones.
///
/// Must satisfy `0 <= walk_away <= escalate <= accept <= 1`; call
/// [`ThresholdConfig::validate`] on anything that came from outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdConfig {
    pub accept: Score,
    pub escalate: Score,
    #[serde(alias = "walk_away")]
    pub walk_away: Score,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            accept: DEFAULT_ACCEPT,
            escalate: DEFAULT_ESCALATE,
            walk_away: DEFAULT_WALK_AWAY,
        }
    }
}

impl ThresholdConfig {
    pub fn new(accept: Score, escalate: Score, walk_away: Score) -> Result<Self, ScoreError> {
        let thresholds = Self {
            accept,
            escalate,
            walk_away,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        for (name, value) in [
            ("accept", self.accept),
            ("escalate", self.escalate),
            ("walk_away", self.walk_away),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ScoreError::InvalidThresholds(format!(
                    "{name} must be between 0.0 and 1.0 (found {value})"
                )));
            }
        }
        if self.walk_away > self.escalate || self.escalate > self.accept {
            return Err(ScoreError::InvalidThresholds(format!(
                "expected walk_away <= escalate <= accept (found {:.3} / {:.3} / {:.3})",
                self.walk_away, self.escalate, self.accept
            )));
        }
        Ok(())
    }
}

/// On-disk configuration, merged from the global, repo and local layers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreConfig {
    pub thresholds: Option<ThresholdSection>,
    pub scoring: Option<ScoringSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThresholdSection {
    pub accept: Option<Score>,
    pub escalate: Option<Score>,
    pub walk_away: Option<Score>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSection {
    pub slider_scale: Option<Score>,
}

impl ScoreConfig {
    pub fn thresholds(&self) -> ThresholdConfig {
        let defaults = ThresholdConfig::default();
        match &self.thresholds {
            Some(section) => ThresholdConfig {
                accept: section.accept.unwrap_or(defaults.accept),
                escalate: section.escalate.unwrap_or(defaults.escalate),
                walk_away: section.walk_away.unwrap_or(defaults.walk_away),
            },
            None => defaults,
        }
    }

    pub fn slider_scale(&self) -> Score {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.slider_scale)
            .unwrap_or(DEFAULT_SLIDER_SCALE)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        self.thresholds()
            .validate()
            .map_err(|e| ScoreError::ConfigParse(format!("thresholds: {e}")))?;

        let scale = self.slider_scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ScoreError::ConfigParse(format!(
                "scoring.slider_scale must be greater than 0 (found {scale})"
            )));
        }

        Ok(())
    }
}
