//! List available scoring strategies.

use taskrank_core::StrategyWeights;

use crate::config::Config;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();

    for name in StrategyWeights::names() {
        print_strategy(name, &StrategyWeights::from_name(name), name == config.default_strategy);
    }

    let mut custom: Vec<_> = config.strategies.iter().collect();
    custom.sort_by_key(|(name, _)| name.as_str());
    for (name, weights) in custom {
        print_strategy(name, &StrategyWeights::from(*weights), *name == config.default_strategy);
    }

    Ok(())
}

fn print_strategy(name: &str, w: &StrategyWeights, is_default: bool) {
    let marker = if is_default { " (default)" } else { "" };
    println!(
        "{name:<18} urgency={:.2} importance={:.2} effort={:.2} dependency={:.2}{marker}",
        w.urgency, w.importance, w.effort, w.dependency
    );
}
