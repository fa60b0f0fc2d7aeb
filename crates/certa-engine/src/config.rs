//! Configuration for proof sessions
//!
//! Selects the reasoning mode and bounds the proof recursion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default recursion bound for nested subgoals
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How elicited answers are weighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMode {
    /// Answers are taken as certain (cf 1.0)
    #[default]
    Deductive,

    /// Answers carry the weight the operator supplied with them
    #[serde(alias = "probabilistic")]
    Approximate,
}

impl ReasoningMode {
    /// Mode name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningMode::Deductive => "deductive",
            ReasoningMode::Approximate => "approximate",
        }
    }

    /// Parse a mode name ("probabilistic" is accepted for approximate)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deductive" => Some(ReasoningMode::Deductive),
            "approximate" | "probabilistic" => Some(ReasoningMode::Approximate),
            _ => None,
        }
    }
}

impl fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the proof engine
///
/// # Examples
///
/// ```
/// use certa_engine::{EngineConfig, ReasoningMode};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.reasoning, ReasoningMode::Deductive);
///
/// let config = EngineConfig::approximate();
/// assert_eq!(config.reasoning, ReasoningMode::Approximate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reasoning mode applied to elicited answers
    #[serde(default)]
    pub reasoning: ReasoningMode,

    /// Maximum nesting of subgoals before a branch is treated as unprovable
    /// Default: 64
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reasoning: ReasoningMode::Deductive,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Deductive configuration (answers are certain)
    pub fn deductive() -> Self {
        Self::default()
    }

    /// Approximate configuration (answers carry operator-supplied weights)
    pub fn approximate() -> Self {
        Self {
            reasoning: ReasoningMode::Approximate,
            ..Self::default()
        }
    }

    /// Override the reasoning mode
    pub fn with_reasoning(mut self, reasoning: ReasoningMode) -> Self {
        self.reasoning = reasoning;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.reasoning, ReasoningMode::Deductive);
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(ReasoningMode::parse("Deductive"), Some(ReasoningMode::Deductive));
        assert_eq!(ReasoningMode::parse("probabilistic"), Some(ReasoningMode::Approximate));
        assert_eq!(ReasoningMode::parse("fuzzy"), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = EngineConfig::approximate();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_toml_defaults_and_alias() {
        let config: EngineConfig = toml::from_str(r#"reasoning = "probabilistic""#).unwrap();
        assert_eq!(config.reasoning, ReasoningMode::Approximate);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);

        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
