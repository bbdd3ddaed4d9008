pub mod errors;

use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Infrastructure shape of the managed estate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructureProfile {
    pub total_managed_nodes: u64,
    pub production_nodes: u64,
    pub staging_nodes: u64,
    pub development_nodes: u64,
    pub server_count: u32,
    pub monthly_server_cost: f64,
    pub run_interval_minutes: u32,
}

impl Default for InfrastructureProfile {
    fn default() -> Self {
        Self {
            total_managed_nodes: 0,
            production_nodes: 0,
            staging_nodes: 0,
            development_nodes: 0,
            server_count: 1,
            monthly_server_cost: 4000.0,
            run_interval_minutes: 30,
        }
    }
}

/// Cookbook estate inventory, bucketed by migration complexity tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CookbookEstateProfile {
    pub total_cookbooks: u64,
    pub unique_cookbooks: u64,
    pub active_cookbooks: u64,
    pub avg_cookbooks_per_node: u32,
    pub tier1_simple: u64,
    pub tier2_standard: u64,
    pub tier3_complex: u64,
}

impl Default for CookbookEstateProfile {
    fn default() -> Self {
        Self {
            total_cookbooks: 0,
            unique_cookbooks: 0,
            active_cookbooks: 0,
            avg_cookbooks_per_node: 10,
            tier1_simple: 0,
            tier2_standard: 0,
            tier3_complex: 0,
        }
    }
}

/// Team and labor inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamProfile {
    pub dedicated_engineers: u32,
    pub part_time_contributors: u32,
    pub part_time_allocation_pct: f64,
    pub average_salary: f64,
    pub benefits_multiplier: f64,
}

impl Default for TeamProfile {
    fn default() -> Self {
        Self {
            dedicated_engineers: 0,
            part_time_contributors: 0,
            part_time_allocation_pct: 20.0,
            average_salary: 165_000.0,
            benefits_multiplier: 1.4,
        }
    }
}

impl TeamProfile {
    /// Dedicated headcount plus fractionally-allocated part-time staff.
    pub fn total_fte(&self) -> f64 {
        self.dedicated_engineers as f64
            + self.part_time_contributors as f64 * (self.part_time_allocation_pct / 100.0)
    }

    pub fn fully_loaded_salary(&self) -> f64 {
        self.average_salary * self.benefits_multiplier
    }
}

/// Incident and reliability inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentProfile {
    pub monthly_incidents: u32,
    pub average_mttr_hours: f64,
    pub engineers_per_incident: f64,
}

impl Default for IncidentProfile {
    fn default() -> Self {
        Self {
            monthly_incidents: 0,
            average_mttr_hours: 6.0,
            engineers_per_incident: 2.5,
        }
    }
}

/// Licensing and discretionary spend inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LicensingProfile {
    pub annual_license_cost: f64,
    /// Informational only; not used by the cost engine.
    pub negotiated_rate_per_node: f64,
    pub annual_training_budget: f64,
    pub monthly_cicd_cost: f64,
    pub annual_contractor_spend: f64,
}

impl Default for LicensingProfile {
    fn default() -> Self {
        Self {
            annual_license_cost: 0.0,
            negotiated_rate_per_node: 55.0,
            annual_training_budget: 0.0,
            monthly_cicd_cost: 0.0,
            annual_contractor_spend: 0.0,
        }
    }
}

/// Complete organization input for a TCO analysis. Constructed once per run
/// and never mutated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationProfile {
    pub infrastructure: InfrastructureProfile,
    pub cookbooks: CookbookEstateProfile,
    pub team: TeamProfile,
    pub incidents: IncidentProfile,
    pub licensing: LicensingProfile,
}

impl OrganizationProfile {
    /// Hard input invariants: every cost and rate must be non-negative.
    /// Count fields are unsigned and cannot go negative; the float inputs
    /// are checked here so nonsensical negative derived costs never
    /// propagate downstream.
    pub fn validate(&self) -> Result<(), errors::CostmapError> {
        let checks = [
            (
                "infrastructure.monthly_server_cost",
                self.infrastructure.monthly_server_cost,
            ),
            (
                "team.part_time_allocation_pct",
                self.team.part_time_allocation_pct,
            ),
            ("team.average_salary", self.team.average_salary),
            ("team.benefits_multiplier", self.team.benefits_multiplier),
            ("incidents.average_mttr_hours", self.incidents.average_mttr_hours),
            (
                "incidents.engineers_per_incident",
                self.incidents.engineers_per_incident,
            ),
            (
                "licensing.annual_license_cost",
                self.licensing.annual_license_cost,
            ),
            (
                "licensing.negotiated_rate_per_node",
                self.licensing.negotiated_rate_per_node,
            ),
            (
                "licensing.annual_training_budget",
                self.licensing.annual_training_budget,
            ),
            ("licensing.monthly_cicd_cost", self.licensing.monthly_cicd_cost),
            (
                "licensing.annual_contractor_spend",
                self.licensing.annual_contractor_spend,
            ),
        ];

        for (field, value) in checks {
            if value < 0.0 {
                return Err(errors::CostmapError::invalid_field(field, value));
            }
        }
        Ok(())
    }

    /// Soft cross-field invariants. These are tolerated (the engine still
    /// produces a report) but surfaced to the caller.
    pub fn consistency_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let cb = &self.cookbooks;

        if cb.active_cookbooks > cb.total_cookbooks {
            warnings.push(format!(
                "active_cookbooks ({}) exceeds total_cookbooks ({})",
                cb.active_cookbooks, cb.total_cookbooks
            ));
        }

        let tier_sum = cb.tier1_simple + cb.tier2_standard + cb.tier3_complex;
        if tier_sum > cb.total_cookbooks {
            warnings.push(format!(
                "complexity tier counts sum to {} but total_cookbooks is {}",
                tier_sum, cb.total_cookbooks
            ));
        }

        let node_sum =
            self.infrastructure.production_nodes + self.infrastructure.staging_nodes
                + self.infrastructure.development_nodes;
        if node_sum > self.infrastructure.total_managed_nodes {
            warnings.push(format!(
                "environment node counts sum to {} but total_managed_nodes is {}",
                node_sum, self.infrastructure.total_managed_nodes
            ));
        }

        warnings
    }
}

/// Qualitative estate health. Ordering matters: rules escalate, never
/// restore.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthScore {
    Healthy,
    Warning,
    Critical,
}

impl HealthScore {
    /// Move to `target` only if it is worse than the current state.
    pub fn escalate(&mut self, target: HealthScore) {
        if target > *self {
            *self = target;
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthScore::Healthy => "healthy",
            HealthScore::Warning => "warning",
            HealthScore::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived estate health assessment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Active cookbooks per 1,000 managed nodes.
    pub cookbook_ratio: f64,
    pub cookbooks_per_fte: f64,
    pub debt_multiplier: f64,
    pub health_score: HealthScore,
    pub issues: Vector<String>,
}

/// Annualized nine-line cost breakdown. The three totals are derived from
/// the lines and never stored, so no independent recomputation path can
/// diverge from the field sum.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub licensing_cost: f64,
    pub infrastructure_cost: f64,
    pub platform_labor_cost: f64,
    pub distributed_labor_cost: f64,
    pub incident_cost: f64,
    pub technical_debt_tax: f64,
    pub training_cost: f64,
    pub contractor_cost: f64,
    pub opportunity_cost: f64,
}

impl CostBreakdown {
    pub fn direct_costs(&self) -> f64 {
        self.licensing_cost + self.infrastructure_cost
    }

    pub fn labor_costs(&self) -> f64 {
        self.platform_labor_cost + self.distributed_labor_cost + self.incident_cost
    }

    pub fn total_annual_tco(&self) -> f64 {
        self.licensing_cost
            + self.infrastructure_cost
            + self.platform_labor_cost
            + self.distributed_labor_cost
            + self.incident_cost
            + self.technical_debt_tax
            + self.training_cost
            + self.contractor_cost
            + self.opportunity_cost
    }
}

/// Migration execution risk. Static per-platform classification from the
/// benchmark table, not derived from the numeric projection.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

impl RiskScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskScore::Low => "low",
            RiskScore::Medium => "medium",
            RiskScore::High => "high",
        }
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-year projection for migrating the estate to one target platform.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub migration_cost: f64,
    pub year1_cost: f64,
    pub year2_cost: f64,
    pub year3_cost: f64,
    pub three_year_total: f64,
    /// Absent when steady-state savings never offset the migration cost.
    pub breakeven_months: Option<f64>,
    pub npv_3year: f64,
    pub risk_score: RiskScore,
}

/// Total annual TCO divided across the estate's unit counts. Denominators
/// are floored at 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PerUnitCosts {
    pub per_node: f64,
    pub per_cookbook: f64,
    pub per_fte: f64,
}

/// Executive summary block of the report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_nodes: u64,
    pub active_cookbooks: u64,
    pub annual_tco: f64,
    pub per_node_cost: f64,
    pub per_cookbook_cost: f64,
    pub health_score: HealthScore,
}

/// Complete TCO analysis report; the engine's single external output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TcoReport {
    pub summary: ReportSummary,
    pub health_metrics: HealthMetrics,
    pub cost_breakdown: CostBreakdown,
    pub per_unit_costs: PerUnitCosts,
    pub scenarios: BTreeMap<String, ScenarioResult>,
    pub recommendations: Vector<String>,
}
