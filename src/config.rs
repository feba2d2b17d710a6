//! Summarizer configuration.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! `SUPERNET_*` environment variables (a `.env` file is honoured by the
//! binary), then command-line flags.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Widest block the sweep tries by default.
pub const DEFAULT_MIN_MASK: u8 = 8;
/// Narrowest block the sweep tries by default.
pub const DEFAULT_MAX_MASK: u8 = 30;
/// Discovered blocks always have a usable-host range, so /31 and /32 are never formed.
pub const MAX_DISCOVERY_MASK: u8 = 30;

pub const ENV_MIN_MASK: &str = "SUPERNET_MIN_MASK";
pub const ENV_MAX_MASK: &str = "SUPERNET_MAX_MASK";
pub const ENV_SORT: &str = "SUPERNET_SORT";
pub const ENV_EXPANSION: &str = "SUPERNET_EXPANSION";
pub const ENV_FOLD_EDGES: &str = "SUPERNET_FOLD_EDGES";

/// How CIDR inputs are expanded into the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionPolicy {
    /// Skip hosts that also appear verbatim as raw input tokens.
    #[default]
    SkipExplicit,
    /// Add every usable host of the range.
    IncludeAll,
}

/// Ordering of the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Plain string order, e.g. "10.0.0.1" before "2.0.0.1".
    #[default]
    Lexicographic,
    /// By address value, then prefix length.
    Numeric,
}

impl FromStr for ExpansionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "skip_explicit" => Ok(ExpansionPolicy::SkipExplicit),
            "include_all" => Ok(ExpansionPolicy::IncludeAll),
            other => Err(format!("unknown expansion policy '{other}'")),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicographic" | "string" => Ok(SortOrder::Lexicographic),
            "numeric" => Ok(SortOrder::Numeric),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Tunables of one [`crate::Summarizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// First (widest) prefix length tried by the mask sweep.
    pub min_mask: u8,
    /// Last (narrowest) prefix length tried by the mask sweep.
    pub max_mask: u8,
    pub expansion: ExpansionPolicy,
    pub sort: SortOrder,
    /// Treat network and broadcast addresses of discovered blocks as covered
    /// when assembling output, instead of leaving them standalone.
    pub fold_edge_addresses: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        SummarizerConfig {
            min_mask: DEFAULT_MIN_MASK,
            max_mask: DEFAULT_MAX_MASK,
            expansion: ExpansionPolicy::default(),
            sort: SortOrder::default(),
            fold_edge_addresses: false,
        }
    }
}

impl SummarizerConfig {
    /// Check the mask range: `min_mask <= max_mask <= 30`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_mask > self.max_mask || self.max_mask > MAX_DISCOVERY_MASK {
            return Err(ConfigError::InvalidMaskRange {
                min: self.min_mask,
                max: self.max_mask,
            });
        }
        Ok(())
    }

    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<SummarizerConfig, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading config file: {}", path.display());
        Self::from_json_str(&json, path)
    }

    /// Parse JSON config text; `origin` names the source in error messages.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<SummarizerConfig, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let config: SummarizerConfig = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| ConfigError::Parse {
                path: origin.to_path_buf(),
                message: format!("path={} error={}", e.path(), e.inner()),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `SUPERNET_*` process environment variables.
    pub fn apply_env(self) -> Result<SummarizerConfig, ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override fields from variables returned by `lookup`.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<SummarizerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MIN_MASK) {
            self.min_mask = parse_env(ENV_MIN_MASK, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_MASK) {
            self.max_mask = parse_env(ENV_MAX_MASK, &value)?;
        }
        if let Some(value) = lookup(ENV_SORT) {
            self.sort = parse_env(ENV_SORT, &value)?;
        }
        if let Some(value) = lookup(ENV_EXPANSION) {
            self.expansion = parse_env(ENV_EXPANSION, &value)?;
        }
        if let Some(value) = lookup(ENV_FOLD_EDGES) {
            self.fold_edge_addresses = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid_env(ENV_FOLD_EDGES, &value)),
            };
        }
        self.validate()?;
        Ok(self)
    }
}

fn invalid_env(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid_env(key, value))
}
