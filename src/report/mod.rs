pub mod json;
pub mod md;

use crate::error::ScoreError;
use crate::history::HistoryReport;
use crate::view::UtilityView;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(view: &UtilityView, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(view).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(view)),
    }
}

pub fn render_history(report: &HistoryReport, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::history_to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::history_to_markdown(report)),
    }
}
