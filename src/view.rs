use crate::scoring::scorer::{classify, percentage};
use crate::types::config::ThresholdConfig;
use crate::types::report::{RawValue, WeightedUtilityResult};
use crate::types::scoring::{ParameterStatus, Score, Zone};
use serde::Serialize;

/// One band of the four-segment utility bar, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSegment {
    pub zone: Zone,
    pub label: &'static str,
    pub color: &'static str,
    pub start: Score,
    pub width: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub parameter_id: String,
    pub utility: Score,
    pub utility_percent: Score,
    pub weight: Score,
    pub contribution: Score,
    pub zone: Zone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ParameterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<RawValue>,
}

/// Everything the dashboard needs to draw one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityView {
    pub result: WeightedUtilityResult,
    pub zone: Zone,
    pub label: &'static str,
    pub color: &'static str,
    pub percentage: Score,
    pub marker: Score,
    pub segments: Vec<ZoneSegment>,
    pub breakdown: Vec<BreakdownRow>,
}

impl UtilityView {
    pub fn new(result: WeightedUtilityResult) -> Self {
        let zone = result.recommendation();
        let thresholds = *result.thresholds();
        let breakdown = result
            .ranked_parameters()
            .into_iter()
            .map(|parameter| BreakdownRow {
                parameter_id: parameter.parameter_id.clone(),
                utility: parameter.utility,
                utility_percent: percentage(parameter.utility),
                weight: parameter.weight,
                contribution: parameter.contribution(),
                zone: classify(parameter.utility, &thresholds),
                status: parameter.status,
                current_value: parameter.current_value.clone(),
                target_value: parameter.target_value.clone(),
                max_value: parameter.max_value.clone(),
            })
            .collect();
        let percent = percentage(result.total_utility());

        Self {
            zone,
            label: zone.label(),
            color: zone.color(),
            percentage: percent,
            marker: percent,
            segments: zone_segments(&thresholds),
            breakdown,
            result,
        }
    }
}

/// Bar segments from worst to best; widths are threshold differences and
/// always add up to 100.
pub fn zone_segments(thresholds: &ThresholdConfig) -> Vec<ZoneSegment> {
    let bounds = [
        0.0,
        thresholds.walk_away,
        thresholds.escalate,
        thresholds.accept,
        1.0,
    ];
    Zone::ALL
        .iter()
        .zip(bounds.windows(2))
        .map(|(zone, pair)| ZoneSegment {
            zone: *zone,
            label: zone.label(),
            color: zone.color(),
            start: percentage(pair[0]),
            width: percentage(pair[1] - pair[0]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightedUtilityAggregator;
    use crate::types::report::ParameterUtility;

    #[test]
    fn segments_follow_threshold_differences() {
        let segments = zone_segments(&ThresholdConfig::default());
        let widths: Vec<_> = segments
            .iter()
            .map(|segment| (segment.zone, segment.width.round()))
            .collect();
        assert_eq!(
            widths,
            vec![
                (Zone::WalkAway, 30.0),
                (Zone::Escalate, 20.0),
                (Zone::Counter, 20.0),
                (Zone::Accept, 30.0),
            ]
        );
        let total: Score = segments.iter().map(|segment| segment.width).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn view_ranks_breakdown_by_weight() {
        let result = WeightedUtilityAggregator::default().aggregate(vec![
            ParameterUtility::new("warranty", 0.9, 10.0),
            ParameterUtility::new("price", 0.5, 60.0),
            ParameterUtility::new("delivery", 0.8, 30.0),
        ]);
        let view = UtilityView::new(result);

        let ids: Vec<_> = view
            .breakdown
            .iter()
            .map(|row| row.parameter_id.as_str())
            .collect();
        assert_eq!(ids, vec!["price", "delivery", "warranty"]);
        assert_eq!(view.breakdown[0].zone, Zone::Counter);
        assert_eq!(view.zone, view.result.recommendation());
        assert_eq!(view.marker, view.percentage);
        assert_eq!(view.color, view.zone.color());
    }

    #[test]
    fn view_serializes_camel_case() {
        let result = WeightedUtilityAggregator::default()
            .aggregate(vec![ParameterUtility::new("price", 0.75, 100.0)]);
        let rendered = serde_json::to_string(&UtilityView::new(result)).expect("view should serialize");
        assert!(rendered.contains("\"totalUtility\":0.75"));
        assert!(rendered.contains("\"recommendation\":\"ACCEPT\""));
        assert!(rendered.contains("\"walkAway\":0.3"));
    }
}
