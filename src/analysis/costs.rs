//! Annual cost breakdown derivation.
//!
//! All lines are annualized: monthly inputs are multiplied out, labor is
//! priced at the fully-loaded salary, and the technical debt tax applies the
//! health multiplier to platform-facing labor only. Complexity-driven waste
//! amplifies maintenance labor, not incident response or direct spend.

use crate::core::{CostBreakdown, OrganizationProfile, PerUnitCosts};

/// Standard annual work hours used to derive the hourly rate.
pub const ANNUAL_WORK_HOURS: f64 = 2080.0;

/// Share of labor spend counted as value-creating work foregone.
pub const OPPORTUNITY_COST_RATE: f64 = 0.15;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Fully-loaded hourly rate for one engineer.
pub fn hourly_rate(profile: &OrganizationProfile) -> f64 {
    profile.team.fully_loaded_salary() / ANNUAL_WORK_HOURS
}

/// Derive the nine-line annual cost breakdown.
///
/// `debt_multiplier` comes from the health analysis; 1.0 means no tax.
pub fn calculate_breakdown(
    profile: &OrganizationProfile,
    debt_multiplier: f64,
) -> CostBreakdown {
    let infra = &profile.infrastructure;
    let team = &profile.team;
    let incidents = &profile.incidents;
    let licensing = &profile.licensing;

    let licensing_cost = licensing.annual_license_cost;
    let infrastructure_cost = infra.server_count as f64
        * infra.monthly_server_cost
        * MONTHS_PER_YEAR
        + licensing.monthly_cicd_cost * MONTHS_PER_YEAR;

    let fully_loaded_salary = team.fully_loaded_salary();
    let platform_labor_cost = team.dedicated_engineers as f64 * fully_loaded_salary;
    let distributed_labor_cost = team.part_time_contributors as f64
        * (team.part_time_allocation_pct / 100.0)
        * fully_loaded_salary;

    let incident_cost = incidents.monthly_incidents as f64
        * MONTHS_PER_YEAR
        * incidents.average_mttr_hours
        * incidents.engineers_per_incident
        * hourly_rate(profile);

    let base_labor = platform_labor_cost + distributed_labor_cost;
    let technical_debt_tax = base_labor * (debt_multiplier - 1.0);

    let labor_costs = platform_labor_cost + distributed_labor_cost + incident_cost;

    CostBreakdown {
        licensing_cost,
        infrastructure_cost,
        platform_labor_cost,
        distributed_labor_cost,
        incident_cost,
        technical_debt_tax,
        training_cost: licensing.annual_training_budget,
        contractor_cost: licensing.annual_contractor_spend,
        opportunity_cost: labor_costs * OPPORTUNITY_COST_RATE,
    }
}

/// Total annual TCO divided across nodes, cookbooks, and dedicated FTEs,
/// flooring each denominator at 1.
pub fn per_unit_costs(
    breakdown: &CostBreakdown,
    profile: &OrganizationProfile,
) -> PerUnitCosts {
    let total = breakdown.total_annual_tco();
    PerUnitCosts {
        per_node: total / profile.infrastructure.total_managed_nodes.max(1) as f64,
        per_cookbook: total / profile.cookbooks.active_cookbooks.max(1) as f64,
        per_fte: total / profile.team.dedicated_engineers.max(1) as f64,
    }
}
