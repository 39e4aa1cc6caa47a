// src/options.rs
use crate::error::ConfigError;
use serde::Deserialize;

/// Switches for the post-merge steps of [`LayeredConfig`](crate::LayeredConfig).
///
/// Every field may be omitted when loading from JSON; missing fields take
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOptions {
    /// Paths looked up in the merged document must start with the root tag.
    pub match_root: bool,
    /// Resolve `${env.NAME}` from the process environment.
    pub environment: bool,
    /// Tag of the top-level element whose children define properties.
    pub properties_section: Option<String>,
    /// Remove `combine.self` and `combine.children` from the result.
    pub strip_merge_attributes: bool,
    /// Expand placeholders at all.
    pub filter: bool,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            match_root: true,
            environment: true,
            properties_section: Some("properties".to_string()),
            strip_merge_attributes: true,
            filter: true,
        }
    }
}

impl ConfigOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
