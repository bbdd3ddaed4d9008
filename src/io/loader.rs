//! Profile document loading.
//!
//! Input documents are YAML (or JSON) with top-level sections mirroring the
//! profile sub-records. Any leaf may be a bare scalar or a
//! confidence-wrapped object `{value: ..., confidence: ...}`; the wrapping
//! is resolved here, once, so the engine only ever sees plain scalars.
//!
//! Defaulting rules: an absent section keeps the sub-record defaults; inside
//! a present section or sub-map, an absent key resolves to 0.

use crate::core::errors::CostmapError;
use crate::core::{
    CookbookEstateProfile, IncidentProfile, InfrastructureProfile, LicensingProfile,
    OrganizationProfile, TeamProfile,
};
use serde::Deserialize;
use std::path::Path;

/// Reported confidence attached to a wrapped value. Informational only.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConfidenceLevel {
    Numeric(f64),
    Label(String),
}

/// A document leaf: either a bare scalar or a confidence-wrapped object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(f64),
    Confidence {
        value: f64,
        #[serde(default)]
        confidence: Option<ConfidenceLevel>,
    },
}

impl FieldValue {
    pub fn resolve(&self) -> f64 {
        match self {
            FieldValue::Scalar(v) => *v,
            FieldValue::Confidence { value, .. } => *value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    infrastructure: Option<RawInfrastructure>,
    cookbooks: Option<RawCookbooks>,
    team: Option<RawTeam>,
    incidents: Option<RawIncidents>,
    licensing: Option<RawLicensing>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawInfrastructure {
    total_managed_nodes: Option<FieldValue>,
    run_interval_minutes: Option<FieldValue>,
    node_breakdown: Option<RawNodeBreakdown>,
    server_topology: Option<RawServerTopology>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNodeBreakdown {
    production: Option<FieldValue>,
    staging: Option<FieldValue>,
    development: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawServerTopology {
    server_count: Option<FieldValue>,
    monthly_server_cost: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCookbooks {
    total_cookbooks: Option<FieldValue>,
    unique_cookbooks: Option<FieldValue>,
    active_cookbooks: Option<FieldValue>,
    avg_cookbooks_per_node: Option<FieldValue>,
    complexity_distribution: Option<RawComplexityDistribution>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawComplexityDistribution {
    tier1_simple: Option<FieldValue>,
    tier2_standard: Option<FieldValue>,
    tier3_complex: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTeam {
    dedicated_engineers: Option<FieldValue>,
    part_time_contributors: Option<FieldValue>,
    part_time_allocation_pct: Option<FieldValue>,
    compensation: Option<RawCompensation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompensation {
    average_salary: Option<FieldValue>,
    benefits_multiplier: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIncidents {
    monthly_incidents: Option<FieldValue>,
    average_mttr_hours: Option<FieldValue>,
    engineers_per_incident: Option<FieldValue>,
    related_incidents: Option<RawRelatedIncidents>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRelatedIncidents {
    monthly_average: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLicensing {
    annual_license_cost: Option<FieldValue>,
    negotiated_rate_per_node: Option<FieldValue>,
    annual_training_budget: Option<FieldValue>,
    monthly_cicd_cost: Option<FieldValue>,
    annual_contractor_spend: Option<FieldValue>,
    current_license: Option<RawCurrentLicense>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCurrentLicense {
    annual_cost: Option<FieldValue>,
}

/// Unwrap a leaf, defaulting to 0 for an absent key, rejecting negatives.
fn scalar(field: &Option<FieldValue>, name: &str) -> Result<f64, CostmapError> {
    let value = field.as_ref().map(FieldValue::resolve).unwrap_or(0.0);
    if value < 0.0 {
        return Err(CostmapError::invalid_field(name, value));
    }
    Ok(value)
}

fn count(field: &Option<FieldValue>, name: &str) -> Result<u64, CostmapError> {
    Ok(scalar(field, name)? as u64)
}

fn count32(field: &Option<FieldValue>, name: &str) -> Result<u32, CostmapError> {
    Ok(scalar(field, name)? as u32)
}

fn resolve_document(raw: RawDocument) -> Result<OrganizationProfile, CostmapError> {
    let mut profile = OrganizationProfile::default();

    if let Some(infra) = raw.infrastructure {
        let mut resolved = InfrastructureProfile {
            total_managed_nodes: count(
                &infra.total_managed_nodes,
                "infrastructure.total_managed_nodes",
            )?,
            run_interval_minutes: count32(
                &infra.run_interval_minutes,
                "infrastructure.run_interval_minutes",
            )?,
            ..Default::default()
        };
        if let Some(breakdown) = infra.node_breakdown {
            resolved.production_nodes =
                count(&breakdown.production, "infrastructure.node_breakdown.production")?;
            resolved.staging_nodes =
                count(&breakdown.staging, "infrastructure.node_breakdown.staging")?;
            resolved.development_nodes = count(
                &breakdown.development,
                "infrastructure.node_breakdown.development",
            )?;
        }
        if let Some(topology) = infra.server_topology {
            resolved.server_count = count32(
                &topology.server_count,
                "infrastructure.server_topology.server_count",
            )?;
            resolved.monthly_server_cost = scalar(
                &topology.monthly_server_cost,
                "infrastructure.server_topology.monthly_server_cost",
            )?;
        }
        profile.infrastructure = resolved;
    }

    if let Some(cookbooks) = raw.cookbooks {
        let mut resolved = CookbookEstateProfile {
            total_cookbooks: count(&cookbooks.total_cookbooks, "cookbooks.total_cookbooks")?,
            unique_cookbooks: count(&cookbooks.unique_cookbooks, "cookbooks.unique_cookbooks")?,
            active_cookbooks: count(&cookbooks.active_cookbooks, "cookbooks.active_cookbooks")?,
            avg_cookbooks_per_node: count32(
                &cookbooks.avg_cookbooks_per_node,
                "cookbooks.avg_cookbooks_per_node",
            )?,
            ..Default::default()
        };
        if let Some(tiers) = cookbooks.complexity_distribution {
            resolved.tier1_simple = count(
                &tiers.tier1_simple,
                "cookbooks.complexity_distribution.tier1_simple",
            )?;
            resolved.tier2_standard = count(
                &tiers.tier2_standard,
                "cookbooks.complexity_distribution.tier2_standard",
            )?;
            resolved.tier3_complex = count(
                &tiers.tier3_complex,
                "cookbooks.complexity_distribution.tier3_complex",
            )?;
        }
        profile.cookbooks = resolved;
    }

    if let Some(team) = raw.team {
        let mut resolved = TeamProfile {
            dedicated_engineers: count32(&team.dedicated_engineers, "team.dedicated_engineers")?,
            part_time_contributors: count32(
                &team.part_time_contributors,
                "team.part_time_contributors",
            )?,
            part_time_allocation_pct: scalar(
                &team.part_time_allocation_pct,
                "team.part_time_allocation_pct",
            )?,
            ..Default::default()
        };
        if let Some(compensation) = team.compensation {
            resolved.average_salary =
                scalar(&compensation.average_salary, "team.compensation.average_salary")?;
            resolved.benefits_multiplier = scalar(
                &compensation.benefits_multiplier,
                "team.compensation.benefits_multiplier",
            )?;
        }
        profile.team = resolved;
    }

    if let Some(incidents) = raw.incidents {
        let monthly = if incidents.monthly_incidents.is_some() {
            count32(&incidents.monthly_incidents, "incidents.monthly_incidents")?
        } else if let Some(related) = &incidents.related_incidents {
            count32(
                &related.monthly_average,
                "incidents.related_incidents.monthly_average",
            )?
        } else {
            0
        };
        profile.incidents = IncidentProfile {
            monthly_incidents: monthly,
            average_mttr_hours: scalar(
                &incidents.average_mttr_hours,
                "incidents.average_mttr_hours",
            )?,
            engineers_per_incident: scalar(
                &incidents.engineers_per_incident,
                "incidents.engineers_per_incident",
            )?,
        };
    }

    if let Some(licensing) = raw.licensing {
        let annual_license_cost = if licensing.annual_license_cost.is_some() {
            scalar(&licensing.annual_license_cost, "licensing.annual_license_cost")?
        } else if let Some(current) = &licensing.current_license {
            scalar(
                &current.annual_cost,
                "licensing.current_license.annual_cost",
            )?
        } else {
            0.0
        };
        profile.licensing = LicensingProfile {
            annual_license_cost,
            negotiated_rate_per_node: scalar(
                &licensing.negotiated_rate_per_node,
                "licensing.negotiated_rate_per_node",
            )?,
            annual_training_budget: scalar(
                &licensing.annual_training_budget,
                "licensing.annual_training_budget",
            )?,
            monthly_cicd_cost: scalar(&licensing.monthly_cicd_cost, "licensing.monthly_cicd_cost")?,
            annual_contractor_spend: scalar(
                &licensing.annual_contractor_spend,
                "licensing.annual_contractor_spend",
            )?,
        };
    }

    profile.validate()?;
    for warning in profile.consistency_warnings() {
        log::warn!("Profile inconsistency: {warning}");
    }

    Ok(profile)
}

/// Parse a YAML profile document.
pub fn parse_yaml_profile(contents: &str) -> Result<OrganizationProfile, CostmapError> {
    let raw: RawDocument = serde_yaml::from_str(contents)?;
    resolve_document(raw)
}

/// Parse a JSON profile document.
pub fn parse_json_profile(contents: &str) -> Result<OrganizationProfile, CostmapError> {
    let raw: RawDocument = serde_json::from_str(contents)?;
    resolve_document(raw)
}

/// Load a profile document, dispatching on file extension.
pub fn load_profile(path: &Path) -> Result<OrganizationProfile, CostmapError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let contents = std::fs::read_to_string(path)?;
    match extension.as_str() {
        "yaml" | "yml" => parse_yaml_profile(&contents),
        "json" => parse_json_profile(&contents),
        other => Err(CostmapError::UnsupportedFormat(format!(
            "{} (expected .yaml, .yml, or .json)",
            if other.is_empty() { "<none>" } else { other }
        ))),
    }
}

/// The built-in 200,000-node / 90,000-cookbook sample estate.
pub fn sample_profile() -> OrganizationProfile {
    OrganizationProfile {
        infrastructure: InfrastructureProfile {
            total_managed_nodes: 200_000,
            production_nodes: 150_000,
            staging_nodes: 30_000,
            development_nodes: 20_000,
            server_count: 12,
            monthly_server_cost: 4_000.0,
            run_interval_minutes: 30,
        },
        cookbooks: CookbookEstateProfile {
            total_cookbooks: 90_000,
            unique_cookbooks: 15_000,
            active_cookbooks: 12_000,
            avg_cookbooks_per_node: 8,
            tier1_simple: 7_200,
            tier2_standard: 3_600,
            tier3_complex: 1_200,
        },
        team: TeamProfile {
            dedicated_engineers: 45,
            part_time_contributors: 120,
            part_time_allocation_pct: 20.0,
            average_salary: 165_000.0,
            benefits_multiplier: 1.4,
        },
        incidents: IncidentProfile {
            monthly_incidents: 25,
            average_mttr_hours: 6.0,
            engineers_per_incident: 2.5,
        },
        licensing: LicensingProfile {
            annual_license_cost: 11_000_000.0,
            negotiated_rate_per_node: 55.0,
            annual_training_budget: 150_000.0,
            monthly_cicd_cost: 15_000.0,
            annual_contractor_spend: 500_000.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn bare_and_wrapped_scalars_resolve_identically() {
        let bare = indoc! {r#"
            infrastructure:
              total_managed_nodes: 5000
        "#};
        let wrapped = indoc! {r#"
            infrastructure:
              total_managed_nodes:
                value: 5000
                confidence: high
        "#};
        let a = parse_yaml_profile(bare).unwrap();
        let b = parse_yaml_profile(wrapped).unwrap();
        assert_eq!(a.infrastructure.total_managed_nodes, 5000);
        assert_eq!(
            a.infrastructure.total_managed_nodes,
            b.infrastructure.total_managed_nodes
        );
    }

    #[test]
    fn numeric_confidence_is_accepted() {
        let contents = indoc! {r#"
            cookbooks:
              active_cookbooks:
                value: 1200
                confidence: 0.8
        "#};
        let profile = parse_yaml_profile(contents).unwrap();
        assert_eq!(profile.cookbooks.active_cookbooks, 1200);
    }

    #[test]
    fn absent_sections_keep_record_defaults() {
        let profile = parse_yaml_profile("infrastructure:\n  total_managed_nodes: 100\n").unwrap();
        assert_eq!(profile.team.average_salary, 165_000.0);
        assert_eq!(profile.team.benefits_multiplier, 1.4);
        assert_eq!(profile.incidents.average_mttr_hours, 6.0);
    }

    #[test]
    fn absent_keys_in_present_sections_resolve_to_zero() {
        let contents = indoc! {r#"
            team:
              dedicated_engineers: 5
              compensation:
                average_salary: 120000
        "#};
        let profile = parse_yaml_profile(contents).unwrap();
        assert_eq!(profile.team.dedicated_engineers, 5);
        assert_eq!(profile.team.average_salary, 120_000.0);
        // benefits_multiplier sits inside the present compensation map
        assert_eq!(profile.team.benefits_multiplier, 0.0);
        // allocation pct sits directly in the present team section
        assert_eq!(profile.team.part_time_allocation_pct, 0.0);
    }

    #[test]
    fn nested_sub_maps_are_honored() {
        let contents = indoc! {r#"
            infrastructure:
              total_managed_nodes: 200000
              node_breakdown:
                production: 150000
                staging: 30000
                development: 20000
              server_topology:
                server_count: 12
                monthly_server_cost: 4000
            incidents:
              related_incidents:
                monthly_average: 25
            licensing:
              current_license:
                annual_cost: 11000000
        "#};
        let profile = parse_yaml_profile(contents).unwrap();
        assert_eq!(profile.infrastructure.production_nodes, 150_000);
        assert_eq!(profile.infrastructure.server_count, 12);
        assert_eq!(profile.incidents.monthly_incidents, 25);
        assert_eq!(profile.licensing.annual_license_cost, 11_000_000.0);
    }

    #[test]
    fn direct_key_wins_over_nested_alias() {
        let contents = indoc! {r#"
            incidents:
              monthly_incidents: 30
              related_incidents:
                monthly_average: 25
        "#};
        let profile = parse_yaml_profile(contents).unwrap();
        assert_eq!(profile.incidents.monthly_incidents, 30);
    }

    #[test]
    fn negative_values_are_rejected() {
        let contents = indoc! {r#"
            licensing:
              annual_license_cost: -5
        "#};
        let err = parse_yaml_profile(contents).unwrap_err();
        assert!(matches!(err, CostmapError::InvalidProfile(_)));
        assert!(err.to_string().contains("annual_license_cost"));
    }

    #[test]
    fn json_documents_parse_too() {
        let contents = r#"{"infrastructure": {"total_managed_nodes": {"value": 750}}}"#;
        let profile = parse_json_profile(contents).unwrap();
        assert_eq!(profile.infrastructure.total_managed_nodes, 750);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estate.toml");
        std::fs::write(&path, "x = 1").unwrap();
        let err = load_profile(&path).unwrap_err();
        assert!(matches!(err, CostmapError::UnsupportedFormat(_)));
    }

    #[test]
    fn sample_profile_matches_canonical_estate() {
        let profile = sample_profile();
        assert_eq!(profile.infrastructure.total_managed_nodes, 200_000);
        assert_eq!(profile.cookbooks.total_cookbooks, 90_000);
        assert_eq!(profile.cookbooks.active_cookbooks, 12_000);
        assert_eq!(
            profile.cookbooks.tier1_simple
                + profile.cookbooks.tier2_standard
                + profile.cookbooks.tier3_complex,
            12_000
        );
        assert!(profile.validate().is_ok());
        assert!(profile.consistency_warnings().is_empty());
    }
}
