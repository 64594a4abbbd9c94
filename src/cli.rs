use clap::{Args, Parser, Subcommand, ValueEnum};
use negoscore::types::report::ParameterUtility;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "negoscore",
    version,
    about = "Weighted-utility scoring and recommendations for RFQ negotiations"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory searched for negoscore.toml and .negoscore/local.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single utility value
    Classify(ClassifyCommand),
    /// Aggregate parameter utilities given on the command line
    Aggregate(AggregateCommand),
    /// Render a snapshot from the negotiation engine
    Evaluate(EvaluateCommand),
    /// Summarize a directory of per-round snapshots
    History(HistoryCommand),
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ClassifyCommand {
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Args)]
pub struct AggregateCommand {
    /// Parameter as ID=UTILITY:WEIGHT, repeatable
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<ParameterUtility>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct EvaluateCommand {
    pub snapshot: PathBuf,
    /// Slider override as ID=POSITION, repeatable
    #[arg(long = "set", value_parser = parse_assignment, allow_negative_numbers = true)]
    pub overrides: Vec<(String, f64)>,
    /// Full-scale slider position; defaults to the configured scale
    #[arg(long)]
    pub slider_scale: Option<f64>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct HistoryCommand {
    pub dir: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

fn parse_number(field: &str, raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{field} must be a number (found '{raw}')"))?;
    if !value.is_finite() {
        return Err(format!("{field} must be finite (found '{raw}')"));
    }
    Ok(value)
}

fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE (found '{raw}')"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err("parameter id cannot be empty".to_string());
    }
    Ok((id, value))
}

pub fn parse_param(raw: &str) -> Result<ParameterUtility, String> {
    let (id, rest) = split_assignment(raw)?;
    let (utility, weight) = rest
        .split_once(':')
        .ok_or_else(|| format!("expected ID=UTILITY:WEIGHT (found '{raw}')"))?;
    let utility = parse_number("utility", utility)?;
    let weight = parse_number("weight", weight)?;
    if weight < 0.0 {
        return Err(format!("weight cannot be negative (found {weight})"));
    }
    Ok(ParameterUtility::new(id, utility, weight))
}

pub fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (id, value) = split_assignment(raw)?;
    Ok((id.to_string(), parse_number("slider position", value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_reads_id_utility_and_weight() {
        let parameter = parse_param("price=0.8:60").expect("param should parse");
        assert_eq!(parameter.parameter_id(), "price");
        assert_eq!(parameter.utility(), 0.8);
        assert_eq!(parameter.weight(), 60.0);
    }

    #[test]
    fn parse_param_clamps_utility() {
        let parameter = parse_param("price=1.5:60").expect("param should parse");
        assert_eq!(parameter.utility(), 1.0);
    }

    #[test]
    fn parse_param_rejects_malformed_input() {
        assert!(parse_param("price").is_err());
        assert!(parse_param("price=0.8").is_err());
        assert!(parse_param("price=high:60").is_err());
        assert!(parse_param("price=0.8:-5").is_err());
        assert!(parse_param("=0.8:60").is_err());
    }

    #[test]
    fn parse_assignment_reads_slider_position() {
        assert_eq!(
            parse_assignment("delivery=7").expect("assignment should parse"),
            ("delivery".to_string(), 7.0)
        );
        assert!(parse_assignment("delivery=NaN").is_err());
    }
}
