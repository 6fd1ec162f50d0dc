//! Compiler configuration.
//!
//! Options are plain data with serde defaults so a project can keep them in a
//! YAML or JSON fragment next to its DSL files:
//!
//! ```yaml
//! dialect: v1
//! tab_width: 4
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::errors::{CompileError, Result};

/// Grammar variant of the DSL.
///
/// The two dialects share one parser; they differ only in a few switches.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
    /// Original grammar
    V1,
    /// Current grammar with wildcard routes and response envelopes
    #[default]
    V4,
}

impl Dialect {
    /// Whether an endpoint name may end in a `*` segment.
    pub fn allow_wildcard(self) -> bool {
        matches!(self, Self::V4)
    }

    /// Whether the `- resp:` envelope directive is recognized.
    pub fn response_envelope(self) -> bool {
        matches!(self, Self::V4)
    }
}

/// Options for one compile run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub dialect: Dialect,
    /// Spaces per nesting level.
    pub tab_width: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            tab_width: 4,
        }
    }
}

impl CompileOptions {
    /// Options for the given dialect with default indentation.
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Loads options from a YAML (or JSON) fragment. Missing keys keep
    /// their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let options: Self =
            serde_yaml::from_str(text).map_err(|e| CompileError::Serialize(e.to_string()))?;
        if options.tab_width == 0 {
            return Err(CompileError::Serialize("tab_width must be at least 1".to_string()));
        }
        Ok(options)
    }
}
