use clap::{Parser, Subcommand};

mod commands;
mod config;
mod payload;

#[derive(Parser)]
#[command(name = "taskrank-cli", version, about = "Task priority analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank a batch of tasks
    Analyze(commands::analyze::AnalyzeArgs),
    /// Show the top-N tasks to do next
    Suggest(commands::suggest::SuggestArgs),
    /// List available scoring strategies
    Strategies,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Strategies => commands::strategies::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
