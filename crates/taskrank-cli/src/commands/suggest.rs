//! Top-N task suggestions.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use taskrank_core::{Analyzer, Suggestion};

use crate::config::Config;
use crate::payload;

#[derive(Args)]
pub struct SuggestArgs {
    /// JSON payload file, or - for stdin
    pub file: String,
    /// Strategy name (overrides payload and config)
    #[arg(long)]
    pub strategy: Option<String>,
    /// Number of suggestions (default: from config, else 3)
    #[arg(long)]
    pub count: Option<usize>,
    /// Evaluation date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Serialize)]
struct SuggestOutput {
    suggestions: Vec<Suggestion>,
    cycles: Vec<String>,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = super::read_input(&args.file)?;
    let payload = payload::parse(&input)?;
    let config = Config::load();

    let strategy = args
        .strategy
        .or_else(|| payload.strategy.clone())
        .unwrap_or_else(|| config.default_strategy.clone());
    let count = args.count.unwrap_or(config.suggest_count);

    let mut analyzer = Analyzer::new().with_weights(config.resolve_weights(&strategy));
    if let Some(overrides) = &payload.weights {
        analyzer = analyzer.with_overrides(overrides);
    }
    if let Some(date) = &args.date {
        analyzer = analyzer.with_today(NaiveDate::parse_from_str(date, "%Y-%m-%d")?);
    }

    let analysis = analyzer.analyze(&payload.tasks)?;
    let output = SuggestOutput {
        suggestions: analysis.suggest(count),
        cycles: analysis.cycles,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
