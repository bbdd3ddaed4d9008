//! The calculation engine: a strict top-down pipeline from profile to
//! report. Each stage is a pure function over immutable inputs plus the
//! benchmark table.

pub mod costs;
pub mod health;
pub mod recommendations;
pub mod report;
pub mod scenario;

pub use costs::{calculate_breakdown, per_unit_costs};
pub use health::analyze_health;
pub use recommendations::generate_recommendations;
pub use report::generate_report;
pub use scenario::{
    calculate_all_scenarios, calculate_migration_cost, calculate_scenario,
    DEFAULT_DISCOUNT_RATE,
};
