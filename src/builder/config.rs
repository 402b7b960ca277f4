//! Machine configuration.

use crate::builder::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Options fixed when a machine is constructed.
///
/// Every field has a default, so a partial (or empty) JSON object is a valid
/// configuration.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_capacity": 16 }"#).unwrap();
/// assert!(config.cache_new_states);
/// assert_eq!(config.history_capacity, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Reuse one instance per variant type instead of constructing a fresh
    /// one on every parameterless transition
    pub cache_new_states: bool,

    /// Number of committed transitions kept in the history, zero disables it
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            cache_new_states: true,
            history_capacity: 0,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the configuration as JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cache_states_without_history() {
        let config = MachineConfig::default();
        assert!(config.cache_new_states);
        assert_eq!(config.history_capacity, 0);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config =
            MachineConfig::from_json(r#"{ "cache_new_states": false, "history_capacity": 8 }"#)
                .unwrap();
        assert!(!config.cache_new_states);
        assert_eq!(config.history_capacity, 8);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = MachineConfig::from_json(r#"{ "cache_new_states": "yes" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
        assert!(err.to_string().starts_with("Invalid machine configuration"));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MachineConfig {
            cache_new_states: false,
            history_capacity: 3,
        };
        let json = config.to_json().unwrap();
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
