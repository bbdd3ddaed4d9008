//! Integration tests for the profile loader: a full confidence-wrapped
//! document must produce the same analysis as the equivalent bare document.

use costmap::{generate_report, parse_yaml_profile, BenchmarkTable, DEFAULT_DISCOUNT_RATE};
use indoc::indoc;

const WRAPPED_DOC: &str = indoc! {r#"
    infrastructure:
      total_managed_nodes:
        value: 200000
        confidence: high
      node_breakdown:
        production: 150000
        staging: 30000
        development: 20000
      server_topology:
        server_count: 12
        monthly_server_cost:
          value: 4000
          confidence: 0.9
    cookbooks:
      total_cookbooks: 90000
      unique_cookbooks: 15000
      active_cookbooks:
        value: 12000
        confidence: medium
      avg_cookbooks_per_node: 8
      complexity_distribution:
        tier1_simple: 7200
        tier2_standard: 3600
        tier3_complex: 1200
    team:
      dedicated_engineers: 45
      part_time_contributors: 120
      part_time_allocation_pct: 20.0
      compensation:
        average_salary: 165000
        benefits_multiplier: 1.4
    incidents:
      monthly_incidents: 25
      average_mttr_hours: 6.0
      engineers_per_incident: 2.5
    licensing:
      annual_license_cost:
        value: 11000000
        confidence: high
      negotiated_rate_per_node: 55
      annual_training_budget: 150000
      monthly_cicd_cost: 15000
      annual_contractor_spend: 500000
"#};

const BARE_DOC: &str = indoc! {r#"
    infrastructure:
      total_managed_nodes: 200000
      node_breakdown:
        production: 150000
        staging: 30000
        development: 20000
      server_topology:
        server_count: 12
        monthly_server_cost: 4000
    cookbooks:
      total_cookbooks: 90000
      unique_cookbooks: 15000
      active_cookbooks: 12000
      avg_cookbooks_per_node: 8
      complexity_distribution:
        tier1_simple: 7200
        tier2_standard: 3600
        tier3_complex: 1200
    team:
      dedicated_engineers: 45
      part_time_contributors: 120
      part_time_allocation_pct: 20.0
      compensation:
        average_salary: 165000
        benefits_multiplier: 1.4
    incidents:
      monthly_incidents: 25
      average_mttr_hours: 6.0
      engineers_per_incident: 2.5
    licensing:
      annual_license_cost: 11000000
      negotiated_rate_per_node: 55
      annual_training_budget: 150000
      monthly_cicd_cost: 15000
      annual_contractor_spend: 500000
"#};

#[test]
fn wrapped_and_bare_documents_analyze_identically() {
    let benchmarks = BenchmarkTable::default();
    let wrapped = parse_yaml_profile(WRAPPED_DOC).unwrap();
    let bare = parse_yaml_profile(BARE_DOC).unwrap();

    let wrapped_report = generate_report(&wrapped, &benchmarks, DEFAULT_DISCOUNT_RATE).unwrap();
    let bare_report = generate_report(&bare, &benchmarks, DEFAULT_DISCOUNT_RATE).unwrap();

    assert_eq!(
        serde_json::to_string(&wrapped_report).unwrap(),
        serde_json::to_string(&bare_report).unwrap()
    );
}

#[test]
fn loaded_document_matches_builtin_sample() {
    let benchmarks = BenchmarkTable::default();
    let loaded = parse_yaml_profile(BARE_DOC).unwrap();
    let loaded_report = generate_report(&loaded, &benchmarks, DEFAULT_DISCOUNT_RATE).unwrap();
    let sample_report = generate_report(
        &costmap::sample_profile(),
        &benchmarks,
        DEFAULT_DISCOUNT_RATE,
    )
    .unwrap();

    assert_eq!(
        loaded_report.summary.annual_tco,
        sample_report.summary.annual_tco
    );
    assert_eq!(
        loaded_report.health_metrics.debt_multiplier,
        sample_report.health_metrics.debt_multiplier
    );
}

#[test]
fn empty_document_yields_a_degenerate_but_valid_report() {
    let profile = parse_yaml_profile("{}").unwrap();
    let report =
        generate_report(&profile, &BenchmarkTable::default(), DEFAULT_DISCOUNT_RATE).unwrap();
    assert_eq!(report.summary.total_nodes, 0);
    assert_eq!(report.health_metrics.cookbook_ratio, 0.0);
    assert_eq!(report.scenarios.len(), 4);
}
