//! Playground configuration
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! gives the stock playground.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/playbook/Nmap_test/dump";
pub const DEFAULT_CATEGORY: &str = "Category";
pub const DEFAULT_TOOLTIP: &str = "No context available";
pub const DEFAULT_BLOCK_COLOUR: u16 = 230;

/// Workspace grid settings handed to the editor widget.
///
/// Serializes as `{ "grid": { "spacing", "length", "colour", "snap" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub grid: GridOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub spacing: u32,
    /// Length of the grid dots.
    pub length: u32,
    pub colour: String,
    pub snap: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            spacing: 20,
            length: 3,
            colour: "#fff".into(),
            snap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Playbook dump URL fetched once per mount.
    pub endpoint: String,
    /// Toolbox label used when the response has no category.
    pub category_fallback: String,
    /// Tooltip used for plays without context.
    pub tooltip_fallback: String,
    pub block_colour: u16,
    /// No timeout when unset; a hung endpoint keeps the view loading.
    pub request_timeout_secs: Option<u64>,
    pub workspace: WorkspaceConfig,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            category_fallback: DEFAULT_CATEGORY.into(),
            tooltip_fallback: DEFAULT_TOOLTIP.into(),
            block_colour: DEFAULT_BLOCK_COLOUR,
            request_timeout_secs: None,
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl PlaygroundConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
