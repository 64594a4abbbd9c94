use crate::history::HistoryReport;
use crate::types::scoring::Zone;
use crate::view::UtilityView;

const BAR_WIDTH: usize = 50;

pub fn to_markdown(view: &UtilityView) -> String {
    let result = &view.result;
    let thresholds = result.thresholds();
    let mut output = String::new();
    output.push_str("# Negotiation Evaluation\n\n");
    output.push_str(&format!(
        "Recommendation: **{}** ({})\n\n",
        view.zone, view.label
    ));
    output.push_str(&format!(
        "Total utility: {:.3} ({:.1}%)\n\n",
        result.total_utility(),
        view.percentage
    ));
    if !result.recommendation_reason().is_empty() {
        output.push_str(&format!("> {}\n\n", result.recommendation_reason()));
    }

    output.push_str("## Zones\n\n");
    output.push_str("```\n");
    output.push_str(&utility_bar(view));
    output.push_str("```\n\n");
    output.push_str(&format!(
        "- walk away < {:.2} <= escalate < {:.2} <= counter < {:.2} <= accept\n\n",
        thresholds.walk_away, thresholds.escalate, thresholds.accept
    ));

    output.push_str("## Parameters\n\n");
    if view.breakdown.is_empty() {
        output.push_str("- none\n");
    } else {
        output.push_str("| parameter | utility | weight | contribution | status | current | target |\n");
        output.push_str("|---|---|---|---|---|---|---|\n");
        for row in &view.breakdown {
            output.push_str(&format!(
                "| {} | {:.1}% | {:.1} | {:.3} | {} | {} | {} |\n",
                row.parameter_id,
                row.utility_percent,
                row.weight,
                row.contribution,
                row.status
                    .map(|status| status.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                row.current_value
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string()),
                row.target_value
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }
    }

    output
}

/// Text rendering of the four-segment bar with a marker under the total.
fn utility_bar(view: &UtilityView) -> String {
    let mut bar = String::with_capacity(BAR_WIDTH);
    let mut filled = 0usize;
    for (index, segment) in view.segments.iter().enumerate() {
        let end = if index + 1 == view.segments.len() {
            BAR_WIDTH
        } else {
            cells(segment.start + segment.width).min(BAR_WIDTH)
        };
        let glyph = match segment.zone {
            Zone::WalkAway => 'W',
            Zone::Escalate => 'E',
            Zone::Counter => 'C',
            Zone::Accept => 'A',
        };
        while filled < end {
            bar.push(glyph);
            filled += 1;
        }
    }

    let marker = cells(view.marker).min(BAR_WIDTH - 1);
    format!("|{bar}|\n {}^ {:.1}%\n", " ".repeat(marker), view.percentage)
}

fn cells(percent: f64) -> usize {
    (percent / 100.0 * BAR_WIDTH as f64).round().max(0.0) as usize
}

pub fn history_to_markdown(report: &HistoryReport) -> String {
    let mut output = String::new();
    output.push_str("# Negotiation History\n\n");
    output.push_str(&format!("Trend: {}\n\n", report.direction));

    if report.rounds.is_empty() {
        output.push_str("- no rounds\n");
        return output;
    }

    output.push_str("| round | total | zone | delta | source |\n");
    output.push_str("|---|---|---|---|---|\n");
    for round in &report.rounds {
        output.push_str(&format!(
            "| {} | {:.3} | {} | {} | {} |\n",
            round.round,
            round.total_utility,
            round.zone,
            round
                .delta
                .map(|delta| format!("{delta:+.3}"))
                .unwrap_or_else(|| "-".to_string()),
            round.source
        ));
    }
    if report.duplicates_skipped > 0 {
        output.push_str(&format!(
            "\n{} repeated snapshot(s) skipped\n",
            report.duplicates_skipped
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{RoundTrend, TrendDirection};
    use crate::scoring::WeightedUtilityAggregator;
    use crate::types::report::ParameterUtility;

    #[test]
    fn markdown_report_contains_sections() {
        let result = WeightedUtilityAggregator::default().aggregate(vec![
            ParameterUtility::new("price", 0.5, 60.0),
            ParameterUtility::new("delivery", 0.8, 40.0),
        ]);
        let rendered = to_markdown(&UtilityView::new(result));

        assert!(rendered.contains("# Negotiation Evaluation"));
        assert!(rendered.contains("Recommendation: **COUNTER** (Counter)"));
        assert!(rendered.contains("## Zones"));
        assert!(rendered.contains("| price | 50.0% | 60.0 | 0.300 | good | - | - |"));
    }

    #[test]
    fn headline_percent_follows_clamped_total() {
        let snapshot = crate::snapshot::parse_snapshot(
            r#"{
                "totalUtility": 1.2,
                "totalUtilityPercent": 120,
                "parameterUtilities": { "price": { "utility": 1.0, "weight": 120 } },
                "recommendation": "ACCEPT"
            }"#,
            &crate::types::config::ThresholdConfig::default(),
        )
        .expect("snapshot should parse");
        let rendered = to_markdown(&UtilityView::new(snapshot.result));

        assert!(rendered.contains("Total utility: 1.000 (100.0%)"));
        assert!(!rendered.contains("120.0%"));
    }

    #[test]
    fn status_and_trend_render_lowercase_names() {
        let result = WeightedUtilityAggregator::default().aggregate(vec![
            ParameterUtility::new("price", 0.1, 50.0),
            ParameterUtility::new("delivery", 0.95, 50.0),
        ]);
        let rendered = to_markdown(&UtilityView::new(result));
        assert!(rendered.contains("| critical |"));
        assert!(rendered.contains("| excellent |"));

        let report = HistoryReport {
            rounds: Vec::new(),
            direction: TrendDirection::Declining,
            duplicates_skipped: 0,
        };
        assert!(history_to_markdown(&report).starts_with("# Negotiation History\n\nTrend: declining\n"));
    }

    #[test]
    fn utility_bar_places_marker_at_total() {
        let result = WeightedUtilityAggregator::default()
            .aggregate(vec![ParameterUtility::new("price", 0.5, 100.0)]);
        let bar = utility_bar(&UtilityView::new(result));
        let lines: Vec<_> = bar.lines().collect();

        assert_eq!(lines[0].len(), BAR_WIDTH + 2);
        assert!(lines[0].starts_with("|WWWWWWWWWWWWWWWEEEEEEEEEE"));
        assert_eq!(lines[1].find('^'), Some(1 + BAR_WIDTH / 2));
    }

    #[test]
    fn history_markdown_lists_rounds() {
        let report = HistoryReport {
            rounds: vec![
                RoundTrend {
                    round: 1,
                    source: "r1.json".to_string(),
                    total_utility: 0.4,
                    zone: Zone::Escalate,
                    delta: None,
                    warnings: 0,
                },
                RoundTrend {
                    round: 2,
                    source: "r2.json".to_string(),
                    total_utility: 0.6,
                    zone: Zone::Counter,
                    delta: Some(0.2),
                    warnings: 0,
                },
            ],
            direction: TrendDirection::Improving,
            duplicates_skipped: 1,
        };
        let rendered = history_to_markdown(&report);
        assert!(rendered.contains("Trend: improving"));
        assert!(rendered.contains("| 2 | 0.600 | COUNTER | +0.200 | r2.json |"));
        assert!(rendered.contains("1 repeated snapshot(s) skipped"));
    }
}
