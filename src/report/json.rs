use crate::history::HistoryReport;
use crate::view::UtilityView;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T: Serialize> {
    version: &'static str,
    generated_at: String,
    #[serde(flatten)]
    body: &'a T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    fn new(body: &'a T) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now().to_rfc3339(),
            body,
        }
    }
}

pub fn to_json(view: &UtilityView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope::new(view))
}

pub fn history_to_json(report: &HistoryReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope::new(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightedUtilityAggregator;
    use crate::types::report::ParameterUtility;

    #[test]
    fn json_report_contains_recommendation_and_metadata() {
        let result = WeightedUtilityAggregator::default()
            .aggregate(vec![ParameterUtility::new("price", 0.8, 100.0)]);
        let rendered = to_json(&UtilityView::new(result)).expect("json should serialize");

        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("rendered json should parse");
        assert_eq!(value["zone"], "ACCEPT");
        assert_eq!(value["result"]["totalUtility"], 0.8);
        assert_eq!(value["breakdown"][0]["parameterId"], "price");
        assert!(value["generatedAt"].is_string());
    }
}
