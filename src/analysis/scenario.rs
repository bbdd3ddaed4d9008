//! Migration scenario projection.
//!
//! For each target platform: one-time migration cost from the tiered
//! cookbook inventory, then a three-year cash-flow projection against the
//! current estate. Year 1 carries the migration itself plus overlapping old
//! and new licensing and a labor surcharge; year 2 stabilizes; year 3 is
//! steady state. NPV discounts each year's *savings* against the current
//! TCO, not the raw costs.

use crate::analysis::costs::hourly_rate;
use crate::config::{BenchmarkTable, PlatformBenchmark};
use crate::core::errors::CostmapError;
use crate::core::{CostBreakdown, OrganizationProfile, ScenarioResult};
use rayon::prelude::*;

/// Annual rate applied when discounting projected savings.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Tooling and setup estimate as a share of migration labor.
const TOOLING_RATE: f64 = 0.10;

/// Post-migration infrastructure footprint relative to current.
const NEW_INFRA_FACTOR: f64 = 0.70;

fn lookup_platform<'a>(
    benchmarks: &'a BenchmarkTable,
    key: &str,
) -> Result<&'a PlatformBenchmark, CostmapError> {
    benchmarks
        .platform(key)
        .ok_or_else(|| CostmapError::UnknownPlatform(key.to_string()))
}

/// One-time cost of moving the cookbook estate to `platform_key`.
///
/// Tier hours scale with the platform's migration factor; on top of the
/// conversion labor come two work-weeks of training per dedicated engineer,
/// a six-month 20%-productivity learning-curve penalty, and tooling at 10%
/// of labor.
pub fn calculate_migration_cost(
    platform_key: &str,
    profile: &OrganizationProfile,
    benchmarks: &BenchmarkTable,
) -> Result<f64, CostmapError> {
    let platform = lookup_platform(benchmarks, platform_key)?;
    let effort = &benchmarks.migration;
    let cookbooks = &profile.cookbooks;

    let total_hours = (cookbooks.tier1_simple as f64 * effort.tier1_hours
        + cookbooks.tier2_standard as f64 * effort.tier2_hours
        + cookbooks.tier3_complex as f64 * effort.tier3_hours)
        * platform.migration_factor;

    let rate = hourly_rate(profile);
    let labor_cost = total_hours * rate;

    let engineers = profile.team.dedicated_engineers as f64;
    let training_cost = engineers * effort.training_hours_per_engineer * rate;
    let learning_cost =
        engineers * (profile.team.fully_loaded_salary() / 2.0) * effort.learning_curve_penalty;
    let tooling_cost = labor_cost * TOOLING_RATE;

    Ok(labor_cost + training_cost + learning_cost + tooling_cost)
}

/// Project a full migration scenario for one target platform.
pub fn calculate_scenario(
    platform_key: &str,
    profile: &OrganizationProfile,
    breakdown: &CostBreakdown,
    benchmarks: &BenchmarkTable,
    discount_rate: f64,
) -> Result<ScenarioResult, CostmapError> {
    let platform = lookup_platform(benchmarks, platform_key)?;
    let migration_cost = calculate_migration_cost(platform_key, profile, benchmarks)?;

    let current_tco = breakdown.total_annual_tco();

    let new_license_cost =
        profile.infrastructure.total_managed_nodes as f64 * platform.per_node_cost;
    let new_labor_cost = breakdown.labor_costs() * (1.0 - benchmarks.migration.labor_reduction);
    let new_infra_cost = breakdown.infrastructure_cost * NEW_INFRA_FACTOR;

    // Year 1: migration plus half a year on each license and a 20% labor
    // surcharge while both stacks run.
    let year1_cost = migration_cost
        + new_license_cost * 0.5
        + breakdown.licensing_cost * 0.5
        + breakdown.labor_costs() * 1.2
        + new_infra_cost;

    // Year 2: stabilization with a 10% labor overhead and residual training.
    let year2_cost =
        new_license_cost + new_labor_cost * 1.1 + new_infra_cost + breakdown.training_cost * 0.5;

    // Year 3: steady state.
    let year3_cost = new_license_cost + new_labor_cost + new_infra_cost * 0.9;

    let three_year_total = year1_cost + year2_cost + year3_cost;

    let annual_savings = current_tco - year3_cost;
    let breakeven_months = if annual_savings > 0.0 {
        Some(migration_cost / annual_savings * 12.0)
    } else {
        None
    };

    let npv_3year = npv_of_savings(
        current_tco,
        [year1_cost, year2_cost, year3_cost],
        discount_rate,
    );

    Ok(ScenarioResult {
        name: format!("Migration to {}", title_case(platform_key)),
        migration_cost,
        year1_cost,
        year2_cost,
        year3_cost,
        three_year_total,
        breakeven_months,
        npv_3year,
        risk_score: platform.risk,
    })
}

/// Compute every platform's scenario exactly once, in benchmark table order.
///
/// Scenario computations are independent reads of immutable inputs, so they
/// fan out across the rayon pool; the ordered collect preserves table order
/// for downstream tie-breaks.
pub fn calculate_all_scenarios(
    profile: &OrganizationProfile,
    breakdown: &CostBreakdown,
    benchmarks: &BenchmarkTable,
    discount_rate: f64,
) -> Result<Vec<(String, ScenarioResult)>, CostmapError> {
    benchmarks
        .alternatives
        .par_iter()
        .map(|platform| {
            calculate_scenario(&platform.key, profile, breakdown, benchmarks, discount_rate)
                .map(|scenario| (platform.key.clone(), scenario))
        })
        .collect()
}

fn npv_of_savings(current_tco: f64, yearly_costs: [f64; 3], discount_rate: f64) -> f64 {
    yearly_costs
        .iter()
        .enumerate()
        .map(|(i, cost)| {
            let year = (i + 1) as i32;
            (current_tco - cost) / (1.0 + discount_rate).powi(year)
        })
        .sum()
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
