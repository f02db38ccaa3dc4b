use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_ROOT: &str = "abstract_api";
pub const DEFAULT_RUNTIME_CRATE: &str = "abstractapi";

/// What each contract artifact carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Typed containers plus validation rules.
    #[default]
    Full,
    /// Untyped pass-through request, no validation.
    Minimal,
}

/// Generator settings, loadable from a TOML file.
///
/// ```toml
/// root = "abstract_api"
/// runtime_crate = "abstractapi"
/// mode = "full"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory (and module) every artifact is placed under.
    pub root: String,
    /// Crate name generated code imports the runtime from.
    pub runtime_crate: String,
    pub mode: GenerationMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            mode: GenerationMode::Full,
        }
    }
}

impl GeneratorConfig {
    /// Read a TOML config; a missing path gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read generator config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid generator config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GeneratorConfig = toml::from_str("mode = \"minimal\"").unwrap();
        assert_eq!(config.mode, GenerationMode::Minimal);
        assert_eq!(config.root, DEFAULT_ROOT);
        assert_eq!(config.runtime_crate, DEFAULT_RUNTIME_CRATE);
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(GeneratorConfig::load(None).unwrap(), GeneratorConfig::default());
    }
}
