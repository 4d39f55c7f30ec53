//! Configuration file loading for fcmkit.
//!
//! Discovers and loads `fcmkit.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fcmkit_types::PluginVars;
use fcmkit_types::vars::KNOWN_VARIABLES;
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "fcmkit.toml";

/// Top-level configuration from fcmkit.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FcmkitConfig {
    /// App name, used instead of the `<name>` element of `config.xml`.
    pub app_name: Option<String>,

    /// Plugin variables layered over `config.xml` and `package.json`.
    /// Booleans and numbers are accepted and stringified.
    pub variables: BTreeMap<String, toml::Value>,
}

impl FcmkitConfig {
    pub fn plugin_vars(&self) -> PluginVars {
        self.variables
            .iter()
            .map(|(k, v)| (k.clone(), stringify(v)))
            .collect()
    }
}

fn stringify(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Discover the fcmkit.toml config file.
///
/// Returns `None` if the project root has none.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a fcmkit.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<FcmkitConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<FcmkitConfig> {
    let config: FcmkitConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<FcmkitConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(FcmkitConfig::default()),
    }
}

/// Configuration after the CLI has been layered over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedConfig {
    pub app_name: Option<String>,
    pub variables: PluginVars,
}

impl MergedConfig {
    /// Variables none of the hooks read, usually a misspelt name.
    pub fn unknown_variables(&self) -> Vec<&str> {
        self.variables
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !KNOWN_VARIABLES.contains(key))
            .collect()
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: FcmkitConfig,
}

impl ConfigMerger {
    pub fn new(config: FcmkitConfig) -> Self {
        Self { config }
    }

    /// `--app-name` replaces `app_name`; each `--var` replaces the variable
    /// of the same name.
    pub fn merge_hook_args(self, cli_app_name: Option<String>, cli_vars: PluginVars) -> MergedConfig {
        let mut variables = self.config.plugin_vars();
        variables.merge(cli_vars);

        MergedConfig {
            app_name: cli_app_name.or(self.config.app_name),
            variables,
        }
    }
}

/// Parse `--var KEY=VALUE` flags. Later flags override earlier ones. The
/// value may be empty.
pub fn parse_var_flags(flags: &[String]) -> anyhow::Result<PluginVars> {
    let mut out = PluginVars::new();
    for entry in flags {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid variable '{}': expected KEY=VALUE", entry))?;
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("invalid variable '{}': missing key", entry);
        }
        out.insert(key, value.trim());
    }
    Ok(out)
}
