//! Engine configuration.
//!
//! Settings come from the environment (`CEPFLOW_*` variables) or from any
//! serde source embedding an [`EngineConfig`].

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const EVALUATION_MODE_VAR: &str = "CEPFLOW_EVALUATION_MODE";

/// Which evaluation path processors take for each push.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Validate arity and input types before evaluating.
    #[default]
    Checked,
    /// Skip validation. Only sound when upstream already guarantees conformance.
    Fast,
}

impl FromStr for EvaluationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checked" => Ok(EvaluationMode::Checked),
            "fast" => Ok(EvaluationMode::Fast),
            _ => Err(ConfigError::InvalidValue {
                key: EVALUATION_MODE_VAR.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub evaluation: EvaluationMode,
}

impl EngineConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let evaluation = match lookup(EVALUATION_MODE_VAR) {
            Some(raw) => raw.parse()?,
            None => EvaluationMode::default(),
        };
        Ok(Self { evaluation })
    }
}
