use crate::error::ScoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Score = f64;

/// Recommendation zone for a utility value.
///
/// Variants are declared worst to best so that `Ord` follows how favorable
/// the zone is: `WalkAway < Escalate < Counter < Accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    WalkAway,
    Escalate,
    Counter,
    Accept,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::WalkAway, Zone::Escalate, Zone::Counter, Zone::Accept];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Accept => "ACCEPT",
            Zone::Counter => "COUNTER",
            Zone::Escalate => "ESCALATE",
            Zone::WalkAway => "WALK_AWAY",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Accept => "Accept",
            Zone::Counter => "Counter",
            Zone::Escalate => "Escalate",
            Zone::WalkAway => "Walk away",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Zone::Accept => "#16a34a",
            Zone::Counter => "#2563eb",
            Zone::Escalate => "#d97706",
            Zone::WalkAway => "#dc2626",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "ACCEPT" => Ok(Zone::Accept),
            "COUNTER" => Ok(Zone::Counter),
            "ESCALATE" => Ok(Zone::Escalate),
            "WALK_AWAY" | "WALKAWAY" => Ok(Zone::WalkAway),
            _ => Err(ScoreError::UnknownRecommendation(s.to_string())),
        }
    }
}

/// Informational per-parameter standing shown next to each breakdown row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl ParameterStatus {
    pub fn from_zone(zone: Zone) -> Self {
        match zone {
            Zone::Accept => ParameterStatus::Excellent,
            Zone::Counter => ParameterStatus::Good,
            Zone::Escalate => ParameterStatus::Warning,
            Zone::WalkAway => ParameterStatus::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParameterStatus::Excellent => "excellent",
            ParameterStatus::Good => "good",
            ParameterStatus::Warning => "warning",
            ParameterStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
