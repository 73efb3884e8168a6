// In: src/config.rs

//! The single source of truth for all curvecache configuration.
//!
//! This module defines the unified `CurveCacheConfig` struct, which is designed
//! to be created once at the application boundary (e.g., from a JSON file) and
//! then passed down through the system via a shared, read-only
//! `Arc<CurveCacheConfig>`.
//!
//! This approach centralizes all settings, eliminates "prop drilling," and
//! keeps connection parameters out of the pipeline components themselves.

use serde::{Deserialize, Serialize};

use crate::error::CurveCacheError;

/// The polynomial degree used when a request does not specify one.
pub const DEFAULT_POLYNOMIAL_DEGREE: usize = 3;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Where the backing SQLite database lives. This is the whole connection
/// surface: the session opens exactly one connection here and holds it for
/// the lifetime of a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageLocation {
    /// **Default:** a private in-memory database. Ideal for tests and for
    /// pipelines whose results are consumed within the same process.
    InMemory,

    /// A database file on disk. Created if absent.
    File { path: String },
}

// Implement `Default` manually for `StorageLocation` because of the struct variant.
impl Default for StorageLocation {
    fn default() -> Self {
        StorageLocation::InMemory
    }
}

/// What the bulk pipeline does when the injected curve is undefined at a
/// generated x. The generator itself never drops points; this policy is
/// applied by the orchestrator, one level up.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// **Default:** abort the run. Already-committed batches survive.
    #[default]
    Abort,

    /// Drop the offending sample and continue.
    Skip,

    /// Evaluate at the nearest end of the fitted range and persist that pair.
    Clamp,
}

//==================================================================================
// II. The Unified CurveCacheConfig
//==================================================================================

/// The single, unified configuration for a curvecache session.
/// This struct is created once and shared throughout the system via an `Arc`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CurveCacheConfig {
    /// Where the backing database lives.
    #[serde(default)]
    pub storage: StorageLocation,

    /// **The number of buffered pairs that triggers a bulk commit.**
    /// Batching exists purely to amortize per-call backend overhead; the
    /// pipeline is sequential either way. Must be greater than zero.
    #[serde(default = "default_flush_threshold")]
    pub flush_threshold: usize,

    /// Policy for samples outside the fitted range during a bulk run.
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,

    /// Degree used for polynomial requests that do not carry their own.
    #[serde(default = "default_polynomial_degree")]
    pub default_polynomial_degree: usize,
}

// Default implementation to make constructing the config easier.
impl Default for CurveCacheConfig {
    fn default() -> Self {
        Self {
            storage: StorageLocation::default(),
            flush_threshold: default_flush_threshold(),
            out_of_range: OutOfRangePolicy::default(),
            default_polynomial_degree: default_polynomial_degree(),
        }
    }
}

impl CurveCacheConfig {
    /// Parses a config from its JSON form, filling omitted fields with
    /// defaults.
    pub fn from_json(text: &str) -> Result<Self, CurveCacheError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make the pipeline misbehave silently.
    pub fn validate(&self) -> Result<(), CurveCacheError> {
        if self.flush_threshold == 0 {
            return Err(CurveCacheError::Config(
                "flush_threshold must be greater than zero".to_string(),
            ));
        }
        if self.default_polynomial_degree == 0 {
            return Err(CurveCacheError::Config(
                "default_polynomial_degree must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Helper for `serde` to provide the default flush threshold.
fn default_flush_threshold() -> usize {
    1000
}

/// Helper for `serde` to provide the default polynomial degree.
fn default_polynomial_degree() -> usize {
    DEFAULT_POLYNOMIAL_DEGREE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sensible() {
        let config = CurveCacheConfig::default();
        assert_eq!(config.storage, StorageLocation::InMemory);
        assert_eq!(config.flush_threshold, 1000);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Abort);
        assert_eq!(config.default_polynomial_degree, 3);
    }

    #[test]
    fn test_from_json_fills_omitted_fields() {
        let config = CurveCacheConfig::from_json(r#"{"flush_threshold": 250}"#).unwrap();
        assert_eq!(config.flush_threshold, 250);
        assert_eq!(config.storage, StorageLocation::InMemory);
    }

    #[test]
    fn test_from_json_parses_tagged_storage_location() {
        let config = CurveCacheConfig::from_json(
            r#"{"storage": {"backend": "file", "path": "/tmp/curves.db"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.storage,
            StorageLocation::File {
                path: "/tmp/curves.db".to_string()
            }
        );
    }

    #[test]
    fn test_zero_flush_threshold_is_rejected() {
        let result = CurveCacheConfig::from_json(r#"{"flush_threshold": 0}"#);
        assert!(matches!(result, Err(CurveCacheError::Config(_))));
    }
}
