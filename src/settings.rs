//! Engine settings loaded from TOML.
//!
//! - `parse_settings_toml(text)` parses and validates
//! - `Settings::load(path)` reads a file
//! - defaults are embedded via `include_str!("default_settings.toml")`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::kind::OperatorKind;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dictionary: DictionarySettings,
    #[serde(default)]
    pub operators: OperatorSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionarySettings {
    #[serde(default)]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSettings {
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default = "default_newline")]
    pub newline: bool,
    #[serde(default)]
    pub overrides: OperatorOverrides,
}

fn default_newline() -> bool {
    true
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            newline: true,
            overrides: OperatorOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorOverrides {
    pub or: Option<String>,
    pub grouping_in: Option<String>,
    pub grouping_out: Option<String>,
    pub char_class_in: Option<String>,
    pub char_class_out: Option<String>,
    pub newline: Option<String>,
}

impl OperatorOverrides {
    pub fn get(&self, kind: OperatorKind) -> Option<&str> {
        let v = match kind {
            OperatorKind::Or => &self.or,
            OperatorKind::GroupingIn => &self.grouping_in,
            OperatorKind::GroupingOut => &self.grouping_out,
            OperatorKind::CharClassIn => &self.char_class_in,
            OperatorKind::CharClassOut => &self.char_class_out,
            OperatorKind::NewLine => &self.newline,
        };
        v.as_deref()
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        parse_settings_toml(&content)
    }

    /// Dictionary directory, if one is configured.
    pub fn dictionary_dir(&self) -> Option<&Path> {
        let dir = self.dictionary.dir.as_path();
        (!dir.as_os_str().is_empty()).then_some(dir)
    }

    /// Effective fragment for every operator role: dialect first, then the
    /// newline switch, then explicit overrides.
    pub fn operator_fragments(&self) -> Vec<(OperatorKind, String)> {
        let ops = &self.operators;
        ops.dialect
            .fragments()
            .map(|(kind, frag)| {
                let frag = match ops.overrides.get(kind) {
                    Some(o) => o,
                    None if kind == OperatorKind::NewLine && !ops.newline => "",
                    None => frag,
                };
                (kind, frag.to_string())
            })
            .collect()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    for kind in OperatorKind::ALL {
        let Some(frag) = s.operators.overrides.get(kind) else {
            continue;
        };
        let field = format!("operators.overrides.{kind}");
        if frag.len() >= migemo_sys::RXGEN_OP_MAXLEN {
            return Err(SettingsError::InvalidValue {
                field,
                reason: format!(
                    "must be shorter than {} bytes",
                    migemo_sys::RXGEN_OP_MAXLEN
                ),
            });
        }
        if frag.contains('\0') {
            return Err(SettingsError::InvalidValue {
                field,
                reason: "must not contain NUL".to_string(),
            });
        }
    }
    Ok(())
}
