//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Policy for records whose pet identifier cannot be coerced to an integer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Log the record at warn level, count it as skipped, and keep
    /// processing the rest of the batch
    Skip,
    /// Abort the whole batch on the first offending record
    Fail,
}

impl Default for CoercionPolicy {
    fn default() -> Self {
        CoercionPolicy::Skip
    }
}

/// Batch pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// What to do with records that fail pet id coercion
    pub coercion_policy: CoercionPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_skip() {
        let config = PipelineConfig::default();
        assert_eq!(config.coercion_policy, CoercionPolicy::Skip);
    }

    #[test]
    fn test_policy_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&CoercionPolicy::Skip).unwrap(), "\"skip\"");
        assert_eq!(serde_json::to_string(&CoercionPolicy::Fail).unwrap(), "\"fail\"");
    }
}
