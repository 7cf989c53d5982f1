//! Configuration types for the tabflow workbench.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

lazy_static! {
    /// Built-in extension → syntax mode table, used when the host supplies
    /// no mode list of its own.
    static ref DEFAULT_MODES: Vec<SyntaxMode> = vec![
        SyntaxMode::new("rust", &["rs"]),
        SyntaxMode::new("javascript", &["js", "mjs", "cjs"]),
        SyntaxMode::new("typescript", &["ts", "tsx"]),
        SyntaxMode::new("json", &["json"]),
        SyntaxMode::new("yaml", &["yaml", "yml"]),
        SyntaxMode::new("html", &["html", "htm"]),
        SyntaxMode::new("css", &["css"]),
        SyntaxMode::new("markdown", &["md", "markdown"]),
        SyntaxMode::new("python", &["py"]),
        SyntaxMode::new("toml", &["toml"]),
        SyntaxMode::new("sh", &["sh", "bash"]),
    ];
}

/// Workbench configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Session settings
    pub session: SessionSettings,
    /// Retention settings
    pub retention: RetentionSettings,
    /// Syntax settings
    pub syntax: SyntaxSettings,
}

impl WorkbenchConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: WorkbenchConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.session.default_tab_name.trim().is_empty() {
            return Err(Error::Config(
                "session.default_tab_name must not be empty".to_string(),
            ));
        }

        if self.retention.key.trim().is_empty() {
            return Err(Error::Config(
                "retention.key must not be empty".to_string(),
            ));
        }

        for mode in &self.syntax.modes {
            mode.validate()?;
        }

        Ok(())
    }
}

/// Session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Display name given to fresh scratch tabs
    pub default_tab_name: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_tab_name: "untitled.txt".to_string(),
        }
    }
}

/// Retention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionSettings {
    /// Storage key the retention record is written under
    pub key: String,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            key: "retained".to_string(),
        }
    }
}

/// Syntax settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxSettings {
    /// Mode applied when nothing else matches
    pub fallback: String,
    /// Extension → mode mappings; empty means use the built-in table
    pub modes: Vec<SyntaxMode>,
}

impl Default for SyntaxSettings {
    fn default() -> Self {
        Self {
            fallback: "plain_text".to_string(),
            modes: Vec::new(),
        }
    }
}

impl SyntaxSettings {
    /// Resolve the syntax mode for a file extension.
    pub fn mode_for_extension(&self, extension: &str) -> Option<&str> {
        let table: &[SyntaxMode] = if self.modes.is_empty() {
            &DEFAULT_MODES
        } else {
            &self.modes
        };
        table
            .iter()
            .find(|mode| mode.extensions.iter().any(|e| e == extension))
            .map(|mode| mode.name.as_str())
    }
}

/// One syntax mode definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxMode {
    /// Mode name (identifier)
    pub name: String,
    /// File extensions handled by this mode
    pub extensions: Vec<String>,
}

impl SyntaxMode {
    fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Validate the mode definition.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("syntax mode name cannot be empty".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(Error::Config(format!(
                "syntax mode '{}' has no extensions",
                self.name
            )));
        }
        Ok(())
    }
}
