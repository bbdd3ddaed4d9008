//! Advisory synthesis.
//!
//! Rule-based and order-preserving: sprawl, debt tax, best migration
//! scenario, reliability. Nothing is mandatory; a clean estate yields an
//! empty list. Consumes the scenarios already computed for the report and
//! never recomputes them.

use crate::config::BenchmarkTable;
use crate::core::{CostBreakdown, HealthMetrics, OrganizationProfile, ScenarioResult};
use crate::formatting::format_currency;
use im::Vector;

/// Debt multiplier at or above which the tax line deserves a call-out.
const DEBT_TAX_ATTENTION: f64 = 1.5;

/// Monthly incident count above which reliability work precedes migration.
const INCIDENT_RATE_THRESHOLD: u32 = 20;

pub fn generate_recommendations(
    profile: &OrganizationProfile,
    health: &HealthMetrics,
    breakdown: &CostBreakdown,
    scenarios: &[(String, ScenarioResult)],
    benchmarks: &BenchmarkTable,
) -> Vector<String> {
    let mut recommendations = Vector::new();
    let thresholds = &benchmarks.health;

    if health.cookbook_ratio > thresholds.cookbook_ratio_warning {
        recommendations.push_back(format!(
            "CRITICAL: Consolidate cookbooks. Current ratio of {:.0}/1K nodes is \
             unsustainable. Target: <{}/1K nodes through wrapper cookbook consolidation.",
            health.cookbook_ratio, thresholds.cookbook_ratio_healthy
        ));
    }

    if health.debt_multiplier >= DEBT_TAX_ATTENTION {
        recommendations.push_back(format!(
            "Technical debt is costing {}/year. Invest in cookbook consolidation to \
             reduce multiplier from {:.2}x to 1.00x.",
            format_currency(breakdown.technical_debt_tax),
            health.debt_multiplier
        ));
    }

    if let Some(best) = best_scenario(scenarios) {
        if best.npv_3year > 0.0 {
            let breakeven = match best.breakeven_months {
                Some(months) => format!("{months:.0} months"),
                None => "N/A".to_string(),
            };
            recommendations.push_back(format!(
                "Consider {}. 3-year NPV: {}. Breakeven: {}. Risk: {}.",
                best.name,
                format_currency(best.npv_3year),
                breakeven,
                best.risk_score
            ));
        }
    }

    if profile.incidents.monthly_incidents > INCIDENT_RATE_THRESHOLD {
        recommendations.push_back(format!(
            "High incident rate ({}/month) suggests stability issues. Prioritize \
             reliability improvements before migration.",
            profile.incidents.monthly_incidents
        ));
    }

    recommendations
}

/// Maximal-NPV scenario, ties broken by slice (benchmark table) order.
fn best_scenario(scenarios: &[(String, ScenarioResult)]) -> Option<&ScenarioResult> {
    let mut best: Option<&ScenarioResult> = None;
    for (_, scenario) in scenarios {
        match best {
            Some(current) if scenario.npv_3year <= current.npv_3year => {}
            _ => best = Some(scenario),
        }
    }
    best
}
