use anyhow::Result;
use clap::Parser;
use costmap::cli::{Cli, Commands};
use costmap::commands::{analyze, init, validate};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            profile,
            sample,
            format,
            output,
            discount_rate,
            plain,
        } => analyze::handle_analyze(analyze::AnalyzeConfig {
            profile,
            sample,
            format,
            output,
            discount_rate,
            plain,
        }),
        Commands::Validate { profile } => validate::handle_validate(&profile),
        Commands::Init { force } => init::init_config(force),
    }
}
