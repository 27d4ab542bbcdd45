use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "typegen.toml";

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Glob for component and application markup
    #[serde(default = "default_components")]
    pub components: String,
    /// Glob for helper scripts
    #[serde(default = "default_helpers")]
    pub helpers: String,
    /// Directory of pre-generated Apex declarations (`*.d.ts`)
    #[serde(default = "default_apex_types")]
    pub apex_types: String,
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            components: default_components(),
            helpers: default_helpers(),
            apex_types: default_apex_types(),
            output: default_output(),
        }
    }
}

fn default_components() -> String {
    "force-app/**/aura/**/*.cmp".to_string()
}

fn default_helpers() -> String {
    "force-app/**/aura/**/*Helper.[jt]s".to_string()
}

fn default_apex_types() -> String {
    "types/apex".to_string()
}

fn default_output() -> String {
    ".sfdx/typings/aura".to_string()
}

/// Load configuration from `path`.
///
/// A missing file is not an error: every setting has a default.
pub fn load_config(path: &str) -> Result<Config> {
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .context(format!("Failed to read {}", path))?;

    let config: Config = toml::from_str(&content)
        .context(format!("Failed to parse {}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let config = load_config("does-not-exist/typegen.toml").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paths.output, ".sfdx/typings/aura");
    }

    #[test]
    fn test_partial_paths_table() {
        let config: Config = toml::from_str(
            r#"
[paths]
output = "typings"
"#,
        )
        .unwrap();
        assert_eq!(config.paths.output, "typings");
        assert_eq!(config.paths.components, "force-app/**/aura/**/*.cmp");
        assert_eq!(config.paths.apex_types, "types/apex");
    }

    #[test]
    fn test_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.paths.helpers, "force-app/**/aura/**/*Helper.[jt]s");
    }
}
