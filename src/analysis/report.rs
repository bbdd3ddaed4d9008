//! Report assembly.
//!
//! Runs the pipeline in dependency order (health, breakdown, per-unit
//! costs, scenarios, recommendations) with each stage consuming the
//! immutable output of the previous one. Every value is computed exactly
//! once per invocation; identical inputs produce identical reports.

use crate::analysis::costs::{calculate_breakdown, per_unit_costs};
use crate::analysis::health::analyze_health;
use crate::analysis::recommendations::generate_recommendations;
use crate::analysis::scenario::calculate_all_scenarios;
use crate::config::BenchmarkTable;
use crate::core::errors::CostmapError;
use crate::core::{OrganizationProfile, ReportSummary, TcoReport};
use std::collections::BTreeMap;

/// Produce the complete TCO analysis report.
pub fn generate_report(
    profile: &OrganizationProfile,
    benchmarks: &BenchmarkTable,
    discount_rate: f64,
) -> Result<TcoReport, CostmapError> {
    let health = analyze_health(profile, benchmarks);
    let breakdown = calculate_breakdown(profile, health.debt_multiplier);
    let per_unit = per_unit_costs(&breakdown, profile);
    let scenarios = calculate_all_scenarios(profile, &breakdown, benchmarks, discount_rate)?;
    let recommendations =
        generate_recommendations(profile, &health, &breakdown, &scenarios, benchmarks);

    let summary = ReportSummary {
        total_nodes: profile.infrastructure.total_managed_nodes,
        active_cookbooks: profile.cookbooks.active_cookbooks,
        annual_tco: breakdown.total_annual_tco(),
        per_node_cost: per_unit.per_node,
        per_cookbook_cost: per_unit.per_cookbook,
        health_score: health.health_score,
    };

    Ok(TcoReport {
        summary,
        health_metrics: health,
        cost_breakdown: breakdown,
        per_unit_costs: per_unit,
        scenarios: scenarios.into_iter().collect::<BTreeMap<_, _>>(),
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scenario::DEFAULT_DISCOUNT_RATE;
    use crate::core::HealthScore;
    use crate::io::loader::sample_profile;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_report_summary() {
        let report = generate_report(
            &sample_profile(),
            &BenchmarkTable::default(),
            DEFAULT_DISCOUNT_RATE,
        )
        .unwrap();

        assert_eq!(report.summary.total_nodes, 200_000);
        assert_eq!(report.summary.active_cookbooks, 12_000);
        assert_eq!(report.summary.health_score, HealthScore::Warning);
        assert!((report.summary.annual_tco - 35_295_323.56).abs() < 1.0);
        assert!((report.summary.per_node_cost - 176.48).abs() < 0.01);
        assert_eq!(report.scenarios.len(), 4);
    }

    #[test]
    fn summary_mirrors_breakdown_total() {
        let report = generate_report(
            &sample_profile(),
            &BenchmarkTable::default(),
            DEFAULT_DISCOUNT_RATE,
        )
        .unwrap();
        assert_eq!(
            report.summary.annual_tco,
            report.cost_breakdown.total_annual_tco()
        );
        assert_eq!(report.summary.per_node_cost, report.per_unit_costs.per_node);
    }

    #[test]
    fn report_generation_is_idempotent() {
        let profile = sample_profile();
        let benchmarks = BenchmarkTable::default();
        let first = generate_report(&profile, &benchmarks, DEFAULT_DISCOUNT_RATE).unwrap();
        let second = generate_report(&profile, &benchmarks, DEFAULT_DISCOUNT_RATE).unwrap();

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn scenarios_keyed_by_platform() {
        let report = generate_report(
            &sample_profile(),
            &BenchmarkTable::default(),
            DEFAULT_DISCOUNT_RATE,
        )
        .unwrap();
        for key in ["ansible", "kubernetes", "terraform", "puppet"] {
            assert!(report.scenarios.contains_key(key), "missing {key}");
        }
        assert_eq!(
            report.scenarios["ansible"].name,
            "Migration to Ansible"
        );
    }

    #[test]
    fn degenerate_profile_still_reports() {
        let report = generate_report(
            &OrganizationProfile::default(),
            &BenchmarkTable::default(),
            DEFAULT_DISCOUNT_RATE,
        )
        .unwrap();
        // Only the default single server contributes cost on an empty estate.
        assert_eq!(report.summary.annual_tco, 48_000.0);
        assert_eq!(report.health_metrics.cookbook_ratio, 0.0);
        assert_eq!(report.scenarios.len(), 4);
    }
}
