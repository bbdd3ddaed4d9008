// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    errors::CostmapError, CookbookEstateProfile, CostBreakdown, HealthMetrics, HealthScore,
    IncidentProfile, InfrastructureProfile, LicensingProfile, OrganizationProfile, PerUnitCosts,
    ReportSummary, RiskScore, ScenarioResult, TcoReport, TeamProfile,
};

pub use crate::analysis::{
    analyze_health, calculate_all_scenarios, calculate_breakdown, calculate_migration_cost,
    calculate_scenario, generate_recommendations, generate_report, per_unit_costs,
    DEFAULT_DISCOUNT_RATE,
};

pub use crate::config::{load_benchmarks, BenchmarkTable, PlatformBenchmark};

pub use crate::io::loader::{load_profile, parse_json_profile, parse_yaml_profile, sample_profile};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
