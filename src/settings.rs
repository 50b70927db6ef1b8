//! Analysis settings loaded from YAML.
//!
//! ```yaml
//! default-root: D3
//! spelling: flat
//! scales:
//!   - major
//!   - natural minor
//! ```
//!
//! Every key is optional; [`Settings::default`] is the unconfigured behaviour
//! (root C4, natural spelling, every built-in scale).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::TheoryError;
use crate::note::{Favor, Note};
use crate::scale::ScaleKind;

/// Settings as written in the file, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSettings {
    pub default_root: Option<String>,
    pub spelling: Option<String>,
    pub scales: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root given to chord-IDs without a root prefix.
    pub default_root: Note,
    /// Spelling of transposition roots and scale-match roots.
    pub spelling: Favor,
    /// Scales considered by scale matching.
    pub scales: Vec<ScaleKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_root: Note::default(),
            spelling: Favor::Natural,
            scales: ScaleKind::ALL.to_vec(),
        }
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self, TheoryError> {
        // An empty document deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| TheoryError::Settings(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn load(path: &Path) -> Result<Self, TheoryError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TheoryError::Settings(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_raw(raw: RawSettings) -> Result<Self, TheoryError> {
        let defaults = Self::default();

        let default_root = match raw.default_root {
            Some(text) => text
                .parse()
                .map_err(|_| TheoryError::Settings(format!("Invalid default-root: {}", text)))?,
            None => defaults.default_root,
        };

        let spelling = match raw.spelling {
            Some(text) => Favor::from_name(&text)
                .ok_or_else(|| TheoryError::Settings(format!("Invalid spelling: {}", text)))?,
            None => defaults.spelling,
        };

        let scales = match raw.scales {
            Some(names) => names
                .iter()
                .map(|name| {
                    name.parse::<ScaleKind>()
                        .map_err(|e| TheoryError::Settings(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.scales,
        };

        Ok(Self {
            default_root,
            spelling,
            scales,
        })
    }
}
