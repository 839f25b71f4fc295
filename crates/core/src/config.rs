//! Planning configuration.
//!
//! A small TOML document selecting the planner effort, the direction and the
//! auxiliary planner flags. Every field is optional.
//!
//! ```toml
//! effort = "measure"
//! direction = "backward"
//! preserve_input = true
//! normalize = true
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{Direction, Flags};

/// How long the engine may spend choosing a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Heuristic plan, no timing runs. Never touches the bound buffers.
    #[default]
    Estimate,
    Measure,
    Patient,
    Exhaustive,
    /// Only succeed if a strategy is already known to the engine.
    WisdomOnly,
}

impl Effort {
    pub fn flags(self) -> Flags {
        match self {
            Effort::Estimate => Flags::ESTIMATE,
            Effort::Measure => Flags::MEASURE,
            Effort::Patient => Flags::PATIENT,
            Effort::Exhaustive => Flags::EXHAUSTIVE,
            Effort::WisdomOnly => Flags::WISDOM_ONLY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlanConfig {
    pub effort: Effort,
    pub direction: Direction,
    pub preserve_input: bool,
    pub destroy_input: bool,
    pub conserve_memory: bool,
    pub unaligned: bool,
    /// Divide the result by the element count after a backward transform.
    pub normalize: bool,
}

impl PlanConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        raw.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preserve_input && self.destroy_input {
            return Err(ConfigError::Conflict(
                "preserve_input and destroy_input are mutually exclusive".into(),
            ));
        }
        Ok(())
    }

    /// The bitmask handed to the engine.
    pub fn flags(&self) -> Flags {
        let mut flags = self.effort.flags();
        flags.set(Flags::PRESERVE_INPUT, self.preserve_input);
        flags.set(Flags::DESTROY_INPUT, self.destroy_input);
        flags.set(Flags::CONSERVE_MEMORY, self.conserve_memory);
        flags.set(Flags::UNALIGNED, self.unaligned);
        flags
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl FromStr for PlanConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: PlanConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration conflict: {0}")]
    Conflict(String),
}
