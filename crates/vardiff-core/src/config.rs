//! Comparer configuration.
//!
//! Parsed from TOML; every field has a default, so an empty document is the
//! default configuration.
//!
//! ```toml
//! sequence_mode = "positional"
//! ```

use crate::errors::{DiffError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How two sequences are aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceMode {
    /// Reconcile by key when the element type declares one, else by position
    #[default]
    Auto,
    /// Always compare index by index
    Positional,
}

impl fmt::Display for SequenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Positional => write!(f, "positional"),
        }
    }
}

/// Settings for one [`Comparer`](crate::Comparer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparerConfig {
    pub sequence_mode: SequenceMode,
}

impl ComparerConfig {
    pub fn positional() -> Self {
        Self {
            sequence_mode: SequenceMode::Positional,
        }
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys or unknown
    /// enum values.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| DiffError::InvalidConfig {
            message: e.to_string(),
        })
    }
}
