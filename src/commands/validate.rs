use crate::analysis::analyze_health;
use crate::config;
use crate::io::loader;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

/// Load a profile, report soft inconsistencies, and show the derived health
/// state. Hard violations (negative values, unparseable documents) surface
/// as errors and a nonzero exit.
pub fn handle_validate(path: &Path) -> Result<()> {
    let profile = loader::load_profile(path)
        .with_context(|| format!("failed to load profile {}", path.display()))?;

    let warnings = profile.consistency_warnings();
    if warnings.is_empty() {
        println!("{} {} parses cleanly", "✓".green(), path.display());
    } else {
        println!(
            "{} {} has {} inconsistency warning(s):",
            "⚠".yellow(),
            path.display(),
            warnings.len()
        );
        for warning in &warnings {
            println!("  - {warning}");
        }
    }

    let benchmarks = config::load_benchmarks();
    let health = analyze_health(&profile, &benchmarks);
    println!(
        "Health: {} (cookbook ratio {:.1}/1K nodes, {:.2}x debt multiplier)",
        health.health_score,
        health.cookbook_ratio,
        health.debt_multiplier
    );
    for issue in &health.issues {
        println!("  - {issue}");
    }

    Ok(())
}
