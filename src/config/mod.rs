//! Benchmark constants driving every downstream calculation.
//!
//! The table is an explicit, ordered, versionable structure rather than a
//! nested map: debt-multiplier steps are evaluated in ascending threshold
//! order, and the alternatives list defines the deterministic iteration
//! order used for NPV tie-breaks.

pub mod loader;

pub use loader::load_benchmarks;

use crate::core::errors::CostmapError;
use crate::core::RiskScore;
use serde::{Deserialize, Serialize};

/// Health classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Cookbook ratio (per 1,000 nodes) at or below which the estate is healthy
    #[serde(default = "default_ratio_healthy")]
    pub cookbook_ratio_healthy: f64,

    #[serde(default = "default_ratio_warning")]
    pub cookbook_ratio_warning: f64,

    #[serde(default = "default_ratio_critical")]
    pub cookbook_ratio_critical: f64,

    /// Cookbooks per FTE above which the team looks understaffed
    #[serde(default = "default_fte_understaffed")]
    pub fte_understaffed: f64,

    /// Cookbooks per FTE below which estate complexity is suspect
    #[serde(default = "default_fte_critical")]
    pub fte_critical: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            cookbook_ratio_healthy: default_ratio_healthy(),
            cookbook_ratio_warning: default_ratio_warning(),
            cookbook_ratio_critical: default_ratio_critical(),
            fte_understaffed: default_fte_understaffed(),
            fte_critical: default_fte_critical(),
        }
    }
}

fn default_ratio_healthy() -> f64 {
    25.0
}
fn default_ratio_warning() -> f64 {
    100.0
}
fn default_ratio_critical() -> f64 {
    500.0
}
fn default_fte_understaffed() -> f64 {
    300.0
}
fn default_fte_critical() -> f64 {
    50.0
}

/// One step of the debt-multiplier lookup: applies to any cookbook ratio at
/// or below `max_ratio`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebtStep {
    pub max_ratio: f64,
    pub multiplier: f64,
}

/// Migration effort constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationEffort {
    #[serde(default = "default_tier1_hours")]
    pub tier1_hours: f64,

    #[serde(default = "default_tier2_hours")]
    pub tier2_hours: f64,

    #[serde(default = "default_tier3_hours")]
    pub tier3_hours: f64,

    /// Two work-weeks of platform training per dedicated engineer
    #[serde(default = "default_training_hours")]
    pub training_hours_per_engineer: f64,

    /// Productivity penalty over the six-month ramp
    #[serde(default = "default_learning_curve_penalty")]
    pub learning_curve_penalty: f64,

    /// Steady-state labor reduction after migration stabilizes
    #[serde(default = "default_labor_reduction")]
    pub labor_reduction: f64,
}

impl Default for MigrationEffort {
    fn default() -> Self {
        Self {
            tier1_hours: default_tier1_hours(),
            tier2_hours: default_tier2_hours(),
            tier3_hours: default_tier3_hours(),
            training_hours_per_engineer: default_training_hours(),
            learning_curve_penalty: default_learning_curve_penalty(),
            labor_reduction: default_labor_reduction(),
        }
    }
}

fn default_tier1_hours() -> f64 {
    4.0
}
fn default_tier2_hours() -> f64 {
    16.0
}
fn default_tier3_hours() -> f64 {
    40.0
}
fn default_training_hours() -> f64 {
    80.0
}
fn default_learning_curve_penalty() -> f64 {
    0.20
}
fn default_labor_reduction() -> f64 {
    0.30
}

/// Benchmark entry for one migration target platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformBenchmark {
    pub key: String,
    pub per_node_cost: f64,
    pub migration_factor: f64,
    pub risk: RiskScore,
}

/// The full benchmark table. Every constant the engine consumes lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkTable {
    pub health: HealthThresholds,
    pub debt_multipliers: Vec<DebtStep>,
    pub migration: MigrationEffort,
    pub alternatives: Vec<PlatformBenchmark>,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self {
            health: HealthThresholds::default(),
            debt_multipliers: default_debt_multipliers(),
            migration: MigrationEffort::default(),
            alternatives: default_alternatives(),
        }
    }
}

fn default_debt_multipliers() -> Vec<DebtStep> {
    vec![
        DebtStep {
            max_ratio: 25.0,
            multiplier: 1.0,
        },
        DebtStep {
            max_ratio: 50.0,
            multiplier: 1.1,
        },
        DebtStep {
            max_ratio: 100.0,
            multiplier: 1.25,
        },
        DebtStep {
            max_ratio: 250.0,
            multiplier: 1.5,
        },
        DebtStep {
            max_ratio: 500.0,
            multiplier: 2.0,
        },
        DebtStep {
            max_ratio: f64::INFINITY,
            multiplier: MAX_DEBT_MULTIPLIER,
        },
    ]
}

fn default_alternatives() -> Vec<PlatformBenchmark> {
    vec![
        PlatformBenchmark {
            key: "ansible".to_string(),
            per_node_cost: 75.0,
            migration_factor: 1.0,
            risk: RiskScore::Medium,
        },
        PlatformBenchmark {
            key: "kubernetes".to_string(),
            per_node_cost: 30.0,
            migration_factor: 1.8,
            risk: RiskScore::High,
        },
        PlatformBenchmark {
            key: "terraform".to_string(),
            per_node_cost: 20.0,
            migration_factor: 1.2,
            risk: RiskScore::Medium,
        },
        PlatformBenchmark {
            key: "puppet".to_string(),
            per_node_cost: 125.0,
            migration_factor: 0.7,
            risk: RiskScore::Low,
        },
    ]
}

/// Ceiling applied when no debt step matches (the default table ends with an
/// infinite threshold, so this only fires for custom tables).
pub const MAX_DEBT_MULTIPLIER: f64 = 2.5;

impl BenchmarkTable {
    /// Look up one migration target by key.
    pub fn platform(&self, key: &str) -> Option<&PlatformBenchmark> {
        self.alternatives.iter().find(|p| p.key == key)
    }

    /// Step lookup: the smallest threshold at or above `cookbook_ratio`
    /// wins, so a ratio exactly at a breakpoint takes the lower multiplier.
    pub fn multiplier_for_ratio(&self, cookbook_ratio: f64) -> f64 {
        self.debt_multipliers
            .iter()
            .find(|step| cookbook_ratio <= step.max_ratio)
            .map(|step| step.multiplier)
            .unwrap_or(MAX_DEBT_MULTIPLIER)
    }

    /// Reject tables a config override has made incoherent.
    pub fn validate(&self) -> Result<(), CostmapError> {
        if self.alternatives.is_empty() {
            return Err(CostmapError::Configuration(
                "benchmark table has no migration alternatives".to_string(),
            ));
        }

        for pair in self.debt_multipliers.windows(2) {
            if pair[1].max_ratio <= pair[0].max_ratio {
                return Err(CostmapError::Configuration(format!(
                    "debt multiplier thresholds must be strictly ascending \
                     ({} then {})",
                    pair[0].max_ratio, pair[1].max_ratio
                )));
            }
            if pair[1].multiplier < pair[0].multiplier {
                return Err(CostmapError::Configuration(format!(
                    "debt multipliers must be non-decreasing ({} then {})",
                    pair[0].multiplier, pair[1].multiplier
                )));
            }
        }

        for step in &self.debt_multipliers {
            if step.multiplier < 1.0 {
                return Err(CostmapError::Configuration(format!(
                    "debt multiplier {} is below 1.0",
                    step.multiplier
                )));
            }
        }

        Ok(())
    }
}
