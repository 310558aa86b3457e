//! `stigctl` configuration.
//!
//! Settings come from, highest precedence first: command-line flags,
//! `STIGCTL_*` environment variables, a TOML configuration file, and
//! built-in defaults.
//!
//! ```toml
//! [oscal]
//! title = "Web Tier"
//! source = "https://example.org/catalog.json"
//!
//! [catalog]
//! cci_file = "/opt/disa/U_CCI_List.xml"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use stig_map::DEFAULT_SOURCE;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "stigctl.toml";
pub const ENV_TITLE: &str = "STIGCTL_OSCAL_TITLE";
pub const ENV_SOURCE: &str = "STIGCTL_OSCAL_SOURCE";
pub const ENV_CCI_FILE: &str = "STIGCTL_CCI_FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub oscal: OscalConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OscalConfig {
    pub title: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub cci_file: Option<PathBuf>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub title: Option<String>,
    pub source: Option<String>,
    pub cci_file: Option<PathBuf>,
}

/// Effective settings after precedence is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub title: Option<String>,
    pub source: String,
    pub cci_file: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parse configuration")
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid configuration {}", path.display()))
    }

    /// Load the configuration file.
    ///
    /// An explicit path must exist. Without one, the first existing file among
    /// `candidates` is used, and no file at all yields the defaults.
    pub fn discover(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }
        for candidate in candidates {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "using configuration file");
                return Ok((Self::load_file(candidate)?, Some(candidate.clone())));
            }
        }
        Ok((Self::default(), None))
    }

    /// Replace file values with those present in the environment.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(title) = lookup(ENV_TITLE) {
            self.oscal.title = Some(title);
        }
        if let Some(source) = lookup(ENV_SOURCE) {
            self.oscal.source = Some(source);
        }
        if let Some(path) = lookup(ENV_CCI_FILE) {
            self.catalog.cci_file = Some(PathBuf::from(path));
        }
        self
    }

    pub fn resolve(&self, overrides: &Overrides) -> Settings {
        Settings {
            title: overrides.title.clone().or_else(|| self.oscal.title.clone()),
            source: overrides
                .source
                .clone()
                .or_else(|| self.oscal.source.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            cci_file: overrides
                .cci_file
                .clone()
                .or_else(|| self.catalog.cci_file.clone()),
        }
    }
}

/// `./stigctl.toml`, then `$HOME/.stigctl/config.toml`.
pub fn default_config_paths(current_dir: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![current_dir.join(CONFIG_FILE_NAME)];
    if let Some(home) = home {
        paths.push(home.join(".stigctl").join("config.toml"));
    }
    paths
}

/// Read the configuration for this process: discovered file plus environment.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let current_dir = std::env::current_dir().context("resolve current directory")?;
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let candidates = default_config_paths(&current_dir, home.as_deref());
    let (config, _) = Config::discover(explicit, &candidates)?;
    Ok(config.with_env(|key| std::env::var(key).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_order() {
        let paths = default_config_paths(Path::new("/work"), Some(Path::new("/home/ops")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/stigctl.toml"),
                PathBuf::from("/home/ops/.stigctl/config.toml"),
            ]
        );
        assert_eq!(default_config_paths(Path::new("/work"), None).len(), 1);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("[oscal]\ntitel = \"typo\"\n").is_err());
    }
}
