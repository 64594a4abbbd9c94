use crate::error::{Result, ScoreError};
use crate::snapshot::{load_snapshot, Snapshot};
use crate::types::config::ThresholdConfig;
use crate::types::scoring::{Score, Zone};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Changes smaller than this between first and last round read as stable.
const STABLE_BAND: Score = 0.005;

#[derive(Debug, Clone)]
pub struct Round {
    pub source: PathBuf,
    pub snapshot: Snapshot,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    pub rounds: Vec<Round>,
    pub duplicates_skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTrend {
    pub round: usize,
    pub source: String,
    pub total_utility: Score,
    pub zone: Zone,
    pub delta: Option<Score>,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub rounds: Vec<RoundTrend>,
    pub direction: TrendDirection,
    pub duplicates_skipped: usize,
}

/// Load every `*.json` snapshot under `dir`, ordered by `evaluatedAt` then
/// path. Rounds without a timestamp sort first. A round identical to the one
/// before it is dropped.
pub fn load_history(dir: &Path, fallback: &ThresholdConfig) -> Result<History> {
    if !dir.is_dir() {
        return Err(ScoreError::PathNotFound(dir.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        let snapshot = load_snapshot(&path, fallback)?;
        let fingerprint = snapshot.result.fingerprint()?;
        loaded.push(Round {
            source: path,
            snapshot,
            fingerprint,
        });
    }
    loaded.sort_by(|a, b| {
        a.snapshot
            .result
            .evaluated_at()
            .cmp(&b.snapshot.result.evaluated_at())
            .then_with(|| a.source.cmp(&b.source))
    });

    let mut history = History::default();
    for round in loaded {
        let repeated = history
            .rounds
            .last()
            .is_some_and(|previous| previous.fingerprint == round.fingerprint);
        if repeated {
            tracing::info!(source = %round.source.display(), "skipping repeated snapshot");
            history.duplicates_skipped += 1;
        } else {
            history.rounds.push(round);
        }
    }
    tracing::info!(
        rounds = history.rounds.len(),
        skipped = history.duplicates_skipped,
        "loaded negotiation history"
    );
    Ok(history)
}

impl History {
    pub fn trend(&self) -> HistoryReport {
        let mut previous: Option<Score> = None;
        let rounds = self
            .rounds
            .iter()
            .enumerate()
            .map(|(index, round)| {
                let total = round.snapshot.result.total_utility();
                let delta = previous.map(|prev| total - prev);
                previous = Some(total);
                RoundTrend {
                    round: index + 1,
                    source: round.source.display().to_string(),
                    total_utility: total,
                    zone: round.snapshot.result.recommendation(),
                    delta,
                    warnings: round.snapshot.warnings.len(),
                }
            })
            .collect::<Vec<_>>();

        let direction = match (rounds.first(), rounds.last()) {
            (Some(first), Some(last)) => direction_of(last.total_utility - first.total_utility),
            _ => TrendDirection::Stable,
        };

        HistoryReport {
            rounds,
            direction,
            duplicates_skipped: self.duplicates_skipped,
        }
    }
}

fn direction_of(change: Score) -> TrendDirection {
    if change >= STABLE_BAND {
        TrendDirection::Improving
    } else if change <= -STABLE_BAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}
