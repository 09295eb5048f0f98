//! Session configuration.
//!
//! Loaded from JSON or from `VALUECHECK_*` environment variables; every field
//! has a default, so an empty document (or an empty environment) yields
//! [`TesterConfig::default`].

use core::fmt;
use core::str::FromStr;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use valuecheck_instantiate::Instantiator;
use valuecheck_observability::LogFormat;

pub const METHODS_VAR: &str = "VALUECHECK_METHODS";
pub const MAX_DEPTH_VAR: &str = "VALUECHECK_MAX_DEPTH";
pub const LOG_FORMAT_VAR: &str = "VALUECHECK_LOG_FORMAT";

/// Object behaviour a session can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Getter,
    Setter,
    Equals,
    HashCode,
    ToString,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Getter,
        Method::Setter,
        Method::Equals,
        Method::HashCode,
        Method::ToString,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Getter => "getter",
            Method::Setter => "setter",
            Method::Equals => "equals",
            Method::HashCode => "hash_code",
            Method::ToString => "to_string",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    /// Accepts `hash_code`, `hashCode` and `hashcode` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "getter" => Ok(Method::Getter),
            "setter" => Ok(Method::Setter),
            "equals" => Ok(Method::Equals),
            "hashcode" => Ok(Method::HashCode),
            "tostring" => Ok(Method::ToString),
            _ => Err(format!("unknown method `{}`", s.trim())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tester configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value `{value}` for {variable}: {reason}")]
    InvalidVariable {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidVariable {
            variable,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterConfig {
    /// Method testers to run, in order.
    pub methods: Vec<Method>,
    /// Bound on nested instantiation.
    pub max_depth: usize,
    pub log_format: LogFormat,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            methods: Method::ALL.to_vec(),
            max_depth: Instantiator::DEFAULT_MAX_DEPTH,
            log_format: LogFormat::default(),
        }
    }
}

impl TesterConfig {
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tester config {}", path.display()))?;
        let config = Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse tester config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded tester config");
        Ok(config)
    }

    /// Build from `VALUECHECK_METHODS` (comma separated),
    /// `VALUECHECK_MAX_DEPTH` and `VALUECHECK_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(METHODS_VAR) {
            config.methods = raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| part.parse::<Method>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|reason| ConfigError::invalid(METHODS_VAR, &raw, reason))?;
        }
        if let Some(raw) = lookup(MAX_DEPTH_VAR) {
            config.max_depth = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(MAX_DEPTH_VAR, &raw, e))?;
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, &raw, e))?;
        }
        Ok(config)
    }
}
