//! # Registry Configuration
//!
//! Knobs a host sets once at startup, typically from a TOML file shipped
//! alongside the rest of its configuration. Every field has a default, so
//! an empty document is a valid configuration.

use serde::Deserialize;

use crate::error::EcsError;

/// Tuning parameters for a [`crate::ecs::Registry`].
///
/// # Example (TOML)
///
/// ```toml
/// index_buckets = 200
/// default_pool_capacity = 128
/// growth_load_factor = 0.7
/// auto_grow_index = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Initial bucket count of the pool index.
    pub index_buckets: usize,
    /// Pool capacity hosts fall back to when a registration call does not
    /// pick its own.
    pub default_pool_capacity: usize,
    /// Load factor above which the registry rehashes its index before
    /// registering another component type.
    pub growth_load_factor: f32,
    /// Disables the load-factor rehash entirely when `false`; registration
    /// then fails once the index saturates.
    pub auto_grow_index: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            index_buckets: 200,
            default_pool_capacity: 128,
            growth_load_factor: 0.7,
            auto_grow_index: true,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] with the parser's message.
    pub fn from_toml_str(text: &str) -> Result<Self, EcsError> {
        toml::from_str(text).map_err(|err| EcsError::InvalidConfig(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.index_buckets, 200);
        assert_eq!(config.default_pool_capacity, 128);
        assert!(config.auto_grow_index);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = RegistryConfig::from_toml_str("index_buckets = 31\n").unwrap();
        assert_eq!(config.index_buckets, 31);
        assert_eq!(config.default_pool_capacity, 128);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RegistryConfig::from_toml_str("bucket_cout = 31\n").unwrap_err();
        assert!(matches!(err, EcsError::InvalidConfig(_)));
    }
}
