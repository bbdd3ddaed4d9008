//! Estate health derivation.
//!
//! Health classification runs ratio rules first, then FTE-efficiency rules.
//! Later rules can only escalate the score, never restore it.

use crate::config::BenchmarkTable;
use crate::core::{HealthMetrics, HealthScore, OrganizationProfile};
use im::Vector;

/// Derive health metrics from the profile and benchmark thresholds.
pub fn analyze_health(
    profile: &OrganizationProfile,
    benchmarks: &BenchmarkTable,
) -> HealthMetrics {
    let cookbook_ratio = cookbook_ratio(profile);
    let cookbooks_per_fte = cookbooks_per_fte(profile);
    let debt_multiplier = benchmarks.multiplier_for_ratio(cookbook_ratio);

    let thresholds = &benchmarks.health;
    let mut issues: Vector<String> = Vector::new();

    let mut health_score = if cookbook_ratio > thresholds.cookbook_ratio_critical {
        issues.push_back(format!(
            "Cookbook ratio ({cookbook_ratio:.1}/1K nodes) is critical. Target: <{}",
            thresholds.cookbook_ratio_healthy
        ));
        HealthScore::Critical
    } else if cookbook_ratio > thresholds.cookbook_ratio_healthy {
        issues.push_back(format!(
            "Cookbook ratio ({cookbook_ratio:.1}/1K nodes) exceeds healthy threshold. \
             Target: <{}",
            thresholds.cookbook_ratio_healthy
        ));
        HealthScore::Warning
    } else {
        HealthScore::Healthy
    };

    if cookbooks_per_fte > thresholds.fte_understaffed {
        // High throughput per head: flag it, but it does not move the score.
        issues.push_back(format!(
            "FTE efficiency ({cookbooks_per_fte:.0} cookbooks/FTE) may indicate understaffing"
        ));
    } else if cookbooks_per_fte < thresholds.fte_critical {
        health_score.escalate(HealthScore::Warning);
        issues.push_back(format!(
            "Low FTE efficiency ({cookbooks_per_fte:.0} cookbooks/FTE) suggests complexity"
        ));
    }

    HealthMetrics {
        cookbook_ratio,
        cookbooks_per_fte,
        debt_multiplier,
        health_score,
        issues,
    }
}

/// Active cookbooks per 1,000 managed nodes; 0 for an empty estate.
pub fn cookbook_ratio(profile: &OrganizationProfile) -> f64 {
    let nodes = profile.infrastructure.total_managed_nodes;
    if nodes == 0 {
        return 0.0;
    }
    profile.cookbooks.active_cookbooks as f64 / nodes as f64 * 1000.0
}

fn cookbooks_per_fte(profile: &OrganizationProfile) -> f64 {
    let total_fte = profile.team.total_fte();
    if total_fte > 0.0 {
        profile.cookbooks.active_cookbooks as f64 / total_fte
    } else {
        0.0
    }
}
