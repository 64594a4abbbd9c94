mod cli;

use clap::Parser;
use negoscore::config;
use negoscore::error::ScoreError;
use negoscore::history;
use negoscore::report::{self, OutputFormat};
use negoscore::scoring::{percentage, Evaluation, UtilityScorer, WeightedUtilityAggregator};
use negoscore::snapshot;
use negoscore::types::config::ScoreConfig;
use negoscore::view::UtilityView;
use tracing_subscriber::{fmt, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn run() -> Result<i32, ScoreError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let loaded = config::load_config(&cli.root)?;
    if loaded.is_none() {
        tracing::debug!(root = %cli.root.display(), "no config found, using default thresholds");
    }
    let cfg = loaded.unwrap_or_default();
    let thresholds = cfg.thresholds();

    match cli.command {
        cli::Commands::Classify(cmd) => {
            let scorer = UtilityScorer::new(thresholds);
            let zone = scorer.classify(cmd.value);
            println!(
                "{} {:.1}% {} {}",
                zone,
                percentage(cmd.value),
                zone.label(),
                zone.color()
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Aggregate(cmd) => {
            let result =
                WeightedUtilityAggregator::with_thresholds(thresholds).aggregate(cmd.params);
            let rendered = report::render(&UtilityView::new(result), output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Evaluate(cmd) => evaluate(cmd, &cfg),
        cli::Commands::History(cmd) => {
            if !cmd.dir.exists() {
                return Err(ScoreError::PathNotFound(cmd.dir.display().to_string()));
            }
            let loaded = history::load_history(&cmd.dir, &thresholds)?;
            let trend = loaded.trend();
            let rendered = report::render_history(&trend, output_format(&cmd.format))?;
            println!("{rendered}");

            if trend.rounds.iter().any(|round| round.warnings > 0) {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
    }
}

fn evaluate(cmd: cli::EvaluateCommand, cfg: &ScoreConfig) -> Result<i32, ScoreError> {
    let snapshot = snapshot::load_snapshot(&cmd.snapshot, &cfg.thresholds())?;
    for warning in &snapshot.warnings {
        eprintln!("warning: {warning}");
    }
    let has_warnings = !snapshot.warnings.is_empty();

    let scale = cmd.slider_scale.unwrap_or_else(|| cfg.slider_scale());
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ScoreError::ConfigParse(format!(
            "slider scale must be greater than 0 (found {scale})"
        )));
    }

    let mut evaluation = Evaluation::from_result(snapshot.result);
    for (parameter_id, position) in &cmd.overrides {
        evaluation.set_slider(parameter_id, *position, scale)?;
    }

    let view = UtilityView::new(evaluation.into_result());
    let rendered = report::render(&view, output_format(&cmd.format))?;
    println!("{rendered}");

    if has_warnings {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
