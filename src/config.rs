//! Generation settings read from an optional JSON file.

use std::path::Path;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::naming::{DEFAULT_PACKAGE_PREFIX, Packaging};
use crate::shader_gen::ShaderFamily;

fn default_package_prefix() -> String {
    DEFAULT_PACKAGE_PREFIX.to_string()
}

fn default_families() -> Vec<ShaderFamily> {
    ShaderFamily::ALL.to_vec()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerationConfig {
    #[serde(default = "default_package_prefix")]
    pub package_prefix: String,
    /// Families to generate. Output keeps the canonical family order.
    #[serde(default = "default_families")]
    pub families: Vec<ShaderFamily>,
    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            package_prefix: default_package_prefix(),
            families: default_families(),
            write_manifest: true,
        }
    }
}

impl GenerationConfig {
    pub fn packaging(&self) -> Packaging {
        Packaging::new(self.package_prefix.clone())
    }

    fn check(&self) -> Result<()> {
        if self.package_prefix.is_empty()
            || self
                .package_prefix
                .split('.')
                .any(|seg| seg.is_empty() || !seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(anyhow!(
                "invalid packagePrefix '{}': expected dot-separated identifiers",
                self.package_prefix
            ));
        }
        Ok(())
    }
}

pub fn parse_config(text: &str) -> Result<GenerationConfig> {
    let config: GenerationConfig =
        serde_json::from_str(text).map_err(|e| anyhow!("invalid generation config json: {e}"))?;
    config.check()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<GenerationConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {e}", path.display()))?;
    parse_config(&text).map_err(|e| anyhow!("{}: {e:#}", path.display()))
}
