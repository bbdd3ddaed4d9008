use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored console report
    Terminal,
    /// Machine-readable report document
    Json,
    /// Markdown report
    Markdown,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => Self::Terminal,
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "costmap")]
#[command(about = "Configuration management estate TCO analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze estate TCO and migration scenarios
    Analyze {
        /// Profile document to analyze (.yaml, .yml, or .json)
        profile: Option<PathBuf>,

        /// Use the built-in sample estate (200,000 nodes)
        #[arg(short, long)]
        sample: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Annual discount rate applied to projected savings
        #[arg(long, default_value = "0.10")]
        discount_rate: f64,

        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },

    /// Check a profile document against input invariants
    Validate {
        /// Profile document to validate
        profile: PathBuf,
    },

    /// Write a .costmap.toml with the default benchmark table
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
