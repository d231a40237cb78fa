//! Validator configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with a constraint declared on a field of an unsupported type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedFieldPolicy {
    /// Report an `UnsupportedFieldType` error for the field.
    #[default]
    Report,
    /// Ignore the constraint.
    Skip,
}

/// How text length is measured by `len`, `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-8 bytes.
    Bytes,
}

impl LengthUnit {
    /// Measure `text` in this unit.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            LengthUnit::Chars => text.chars().count(),
            LengthUnit::Bytes => text.len(),
        }
    }
}

/// Configuration for a [`Validator`](crate::validator::Validator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Handling of constraints on unsupported field types.
    pub unsupported_fields: UnsupportedFieldPolicy,

    /// Unit for text length checks.
    pub length_unit: LengthUnit,
}

impl ValidatorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unsupported field policy.
    pub fn with_unsupported_fields(mut self, policy: UnsupportedFieldPolicy) -> Self {
        self.unsupported_fields = policy;
        self
    }

    /// Set the length unit.
    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
