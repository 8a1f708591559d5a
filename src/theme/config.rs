//! User theme file.
//!
//! Extra presets can be supplied as a versioned TOML file and are appended
//! after the built-in registry at compile time, so a user ruleset for an
//! existing name wins the CSS cascade. Unlike preset resolution, this
//! surface validates eagerly: a color that does not parse is rejected with
//! the offending theme/field/value instead of silently compiling to black.
//!
//! ```toml
//! version = 1
//!
//! [themes.solarized]
//! base1 = "#fdf6e3"
//! primary = "#268bd2"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

use super::spec::{PresetRegistry, ThemeSpec};

pub const THEME_FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFile {
    #[serde(default = "default_theme_file_version")]
    pub version: u32,
    /// User themes keyed by name. `BTreeMap` keeps compilation order
    /// deterministic independent of TOML table order.
    #[serde(default)]
    pub themes: BTreeMap<String, ThemeSpec>,
}

impl ThemeFile {
    pub fn from_toml_str(raw: &str) -> Result<Self, ThemeFileError> {
        let file: Self =
            toml::from_str(raw).map_err(|source| ThemeFileError::ParseToml { source })?;
        file.validate()?;
        Ok(file)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ThemeFileError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ThemeFileError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ThemeFileError> {
        if self.version != THEME_FILE_VERSION {
            return Err(ThemeFileError::UnsupportedVersion {
                found: self.version,
                expected: THEME_FILE_VERSION,
            });
        }
        for (name, spec) in &self.themes {
            for (slot, value) in spec.declared() {
                if Rgba::parse(value).is_none() {
                    return Err(ThemeFileError::InvalidColorValue {
                        theme: name.clone(),
                        field: slot.key(),
                        value: value.trim().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Registry entries for the user themes, in map (name) order.
    pub fn into_entries(self) -> PresetRegistry {
        self.themes.into_iter().collect()
    }
}

impl Default for ThemeFile {
    fn default() -> Self {
        Self {
            version: THEME_FILE_VERSION,
            themes: BTreeMap::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ThemeFileError {
    #[error("unsupported theme file version {found}; expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("invalid color value for `{field}` in theme `{theme}`: {value}")]
    InvalidColorValue {
        theme: String,
        field: &'static str,
        value: String,
    },
    #[error("failed to parse theme file TOML: {source}")]
    ParseToml { source: toml::de::Error },
    #[error("failed to read theme file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn default_theme_file_version() -> u32 {
    THEME_FILE_VERSION
}
