//! # Ledger Configuration
//!
//! All values have defaults suitable for production use and can be
//! overridden with `with_*` builders, environment variables or JSON.

use serde::Deserialize;
use shared_types::{LogicalTime, ShareUnit};
use thiserror::Error;

/// Default denominator: one share unit is a millionth of the property.
pub const DEFAULT_DENOMINATOR: ShareUnit = 1_000_000;

/// How long a `(creator, metadata_hash)` registration blocks re-creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupWindow {
    /// The pair can never be registered twice.
    Permanent,
    /// The pair is blocked for this many logical ticks after registration.
    Ticks(LogicalTime),
}

impl DedupWindow {
    /// Whether a registration made at `registered_at` still blocks at `now`.
    pub fn blocks(&self, registered_at: LogicalTime, now: LogicalTime) -> bool {
        match self {
            DedupWindow::Permanent => true,
            DedupWindow::Ticks(window) => now.saturating_sub(registered_at) < *window,
        }
    }
}

/// Who may amend a property's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendPolicy {
    /// Only a caller holding the full denominator.
    SoleOwnerOnly,
    /// The sole owner, or the original creator while no ownership change
    /// has ever been committed.
    SoleOwnerOrPristineCreator,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),

    #[error("Malformed JSON configuration: {0}")]
    Json(String),
}

/// Configuration for the property ledger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Units minted per property (default: 1,000,000). Fixed at mint time.
    pub denominator: ShareUnit,

    /// Duplicate-metadata window (default: permanent).
    pub dedup_window: DedupWindow,

    /// Amend authorization policy (default: sole owner only).
    pub amend_policy: AmendPolicy,

    /// Maximum legs in one split (default: 64).
    pub max_split_allocations: usize,

    /// Maximum records returned by one `list` call (default: 100).
    pub max_page_size: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            denominator: DEFAULT_DENOMINATOR,
            dedup_window: DedupWindow::Permanent,
            amend_policy: AmendPolicy::SoleOwnerOnly,
            max_split_allocations: 64,
            max_page_size: 100,
        }
    }
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_denominator(mut self, denominator: ShareUnit) -> Self {
        self.denominator = denominator;
        self
    }

    pub fn with_dedup_window(mut self, window: DedupWindow) -> Self {
        self.dedup_window = window;
        self
    }

    pub fn with_amend_policy(mut self, policy: AmendPolicy) -> Self {
        self.amend_policy = policy;
        self
    }

    pub fn with_max_split_allocations(mut self, max: usize) -> Self {
        self.max_split_allocations = max;
        self
    }

    pub fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = max;
        self
    }

    /// Reject configurations the ledger cannot operate under.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.denominator == 0 {
            return Err(ConfigError::Invalid("denominator must be positive"));
        }
        if self.max_split_allocations == 0 {
            return Err(ConfigError::Invalid("max_split_allocations must be positive"));
        }
        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid("max_page_size must be positive"));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `PC_*` environment variables on top of the defaults.
    ///
    /// - `PC_DENOMINATOR`: positive integer
    /// - `PC_DEDUP_WINDOW`: `permanent` or a tick count
    /// - `PC_AMEND_POLICY`: `sole_owner_only` or `sole_owner_or_pristine_creator`
    /// - `PC_MAX_SPLIT_ALLOCATIONS`: positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("PC_DENOMINATOR") {
            config.denominator = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PC_DENOMINATOR",
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup("PC_DEDUP_WINDOW") {
            config.dedup_window = if value.eq_ignore_ascii_case("permanent") {
                DedupWindow::Permanent
            } else {
                let ticks = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "PC_DEDUP_WINDOW",
                    value: value.clone(),
                })?;
                DedupWindow::Ticks(ticks)
            };
        }

        if let Some(value) = lookup("PC_AMEND_POLICY") {
            config.amend_policy = match value.to_lowercase().as_str() {
                "sole_owner_only" => AmendPolicy::SoleOwnerOnly,
                "sole_owner_or_pristine_creator" => AmendPolicy::SoleOwnerOrPristineCreator,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "PC_AMEND_POLICY",
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup("PC_MAX_SPLIT_ALLOCATIONS") {
            config.max_split_allocations =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "PC_MAX_SPLIT_ALLOCATIONS",
                    value: value.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.denominator, 1_000_000);
        assert_eq!(config.dedup_window, DedupWindow::Permanent);
        assert_eq!(config.amend_policy, AmendPolicy::SoleOwnerOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dedup_window_blocks() {
        assert!(DedupWindow::Permanent.blocks(0, u64::MAX));
        assert!(DedupWindow::Ticks(10).blocks(5, 14));
        assert!(!DedupWindow::Ticks(10).blocks(5, 15));
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let config = LedgerConfig::default().with_denominator(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = LedgerConfig::from_lookup(lookup(&[
            ("PC_DENOMINATOR", "10000"),
            ("PC_DEDUP_WINDOW", "50"),
            ("PC_AMEND_POLICY", "sole_owner_or_pristine_creator"),
        ]))
        .unwrap();

        assert_eq!(config.denominator, 10_000);
        assert_eq!(config.dedup_window, DedupWindow::Ticks(50));
        assert_eq!(config.amend_policy, AmendPolicy::SoleOwnerOrPristineCreator);
        assert_eq!(config.max_split_allocations, 64);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = LedgerConfig::from_lookup(lookup(&[("PC_DENOMINATOR", "lots")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "PC_DENOMINATOR",
                ..
            })
        ));

        let result = LedgerConfig::from_lookup(lookup(&[("PC_AMEND_POLICY", "anyone")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            LedgerConfig::from_json(r#"{"denominator": 100, "dedup_window": {"ticks": 3}}"#)
                .unwrap();
        assert_eq!(config.denominator, 100);
        assert_eq!(config.dedup_window, DedupWindow::Ticks(3));
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            LedgerConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(LedgerConfig::from_json(r#"{"denominator": 0}"#).is_err());
    }
}
