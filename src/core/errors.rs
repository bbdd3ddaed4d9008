//! Shared error types for the application

use thiserror::Error;

/// Main error type for costmap operations
#[derive(Debug, Error)]
pub enum CostmapError {
    /// Scenario or migration-cost request for a platform missing from the
    /// benchmark alternatives table. Fatal to that call; never substituted
    /// with a default platform.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Profile input violates a hard invariant (negative counts or costs)
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Input document format the loader cannot parse
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Benchmark configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parse errors from the profile loader
    #[error("Failed to parse profile document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CostmapError {
    /// Create an invalid-profile error with field context
    pub fn invalid_field(field: &str, value: f64) -> Self {
        Self::InvalidProfile(format!("{field} must be non-negative, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_platform_names_the_offender() {
        let err = CostmapError::UnknownPlatform("saltstack".to_string());
        assert_eq!(err.to_string(), "Unknown platform: saltstack");
    }

    #[test]
    fn invalid_field_carries_value() {
        let err = CostmapError::invalid_field("team.average_salary", -1.0);
        assert!(err.to_string().contains("team.average_salary"));
        assert!(err.to_string().contains("-1"));
    }
}
