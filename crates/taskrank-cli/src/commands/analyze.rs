//! Score and rank a full task batch.

use chrono::NaiveDate;
use clap::Args;
use taskrank_core::{Analyzer, CycleMode};

use crate::config::Config;
use crate::payload;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON payload file, or - for stdin
    pub file: String,
    /// Strategy name (overrides payload and config)
    #[arg(long)]
    pub strategy: Option<String>,
    /// Weight override as factor=value, repeatable
    #[arg(long = "weight")]
    pub weights: Vec<String>,
    /// Abort with an error if the batch contains a dependency cycle
    #[arg(long)]
    pub strict: bool,
    /// Evaluation date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = super::read_input(&args.file)?;
    let payload = payload::parse(&input)?;
    let config = Config::load();

    let strategy = args
        .strategy
        .or_else(|| payload.strategy.clone())
        .unwrap_or_else(|| config.default_strategy.clone());

    let mut analyzer = Analyzer::new().with_weights(config.resolve_weights(&strategy));
    if let Some(overrides) = &payload.weights {
        analyzer = analyzer.with_overrides(overrides);
    }
    // Command-line overrides win over payload overrides.
    if !args.weights.is_empty() {
        analyzer = analyzer.with_overrides(&payload::parse_weight_flags(&args.weights)?);
    }
    if args.strict {
        analyzer = analyzer.with_mode(CycleMode::Strict);
    }
    if let Some(date) = &args.date {
        analyzer = analyzer.with_today(NaiveDate::parse_from_str(date, "%Y-%m-%d")?);
    }

    let analysis = analyzer.analyze(&payload.tasks)?;

    if args.compact {
        println!("{}", serde_json::to_string(&analysis)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    }
    Ok(())
}
