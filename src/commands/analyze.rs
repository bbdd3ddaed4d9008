use crate::cli;
use crate::config;
use crate::formatting::ColorMode;
use crate::io::{self, loader};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub profile: Option<PathBuf>,
    pub sample: bool,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub discount_rate: f64,
    pub plain: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    if config.plain {
        ColorMode::Never.apply();
    } else {
        ColorMode::Auto.apply();
    }

    anyhow::ensure!(
        config.discount_rate >= 0.0 && config.discount_rate < 1.0,
        "discount rate must be in [0, 1), got {}",
        config.discount_rate
    );

    let benchmarks = config::load_benchmarks();
    let profile = resolve_profile(&config)?;

    let report =
        crate::analysis::generate_report(&profile, &benchmarks, config.discount_rate)?;

    let mut writer = io::output::create_writer(config.format.into(), config.output.as_deref())?;
    writer.write_report(&report)?;

    if let Some(path) = &config.output {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

fn resolve_profile(config: &AnalyzeConfig) -> Result<crate::core::OrganizationProfile> {
    match (&config.profile, config.sample) {
        (Some(path), false) => loader::load_profile(path)
            .with_context(|| format!("failed to load profile {}", path.display())),
        (Some(_), true) => {
            anyhow::bail!("--sample conflicts with an explicit profile path")
        }
        (None, sample) => {
            if !sample {
                eprintln!(
                    "No profile specified. Using sample estate: 200,000 nodes, 90,000 cookbooks"
                );
            }
            Ok(loader::sample_profile())
        }
    }
}
