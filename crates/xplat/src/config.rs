use crate::filename::{StemOptions, MAX_NAME_BYTES};
use crate::plan::CollisionPolicy;
use crate::style::Style;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolved settings for one run, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Naming style to apply
    pub style: Style,

    /// Report the plan without renaming anything
    pub dry_run: bool,

    /// Only consider files with this extension (validated, lowercase)
    pub extension: Option<String>,

    /// Longest file name allowed, in bytes
    pub max_bytes: usize,

    /// Walk into subdirectories
    pub recursive: bool,

    /// Move renamed files here instead of renaming in place
    pub target_dir: Option<PathBuf>,

    /// Transliterate names to ASCII
    pub ascii_only: bool,

    /// Tie-break for names contested within one batch
    pub collision_policy: CollisionPolicy,

    /// Tool version, taken from package metadata at startup
    pub version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: Style::Web,
            dry_run: false,
            extension: None,
            max_bytes: MAX_NAME_BYTES,
            recursive: false,
            target_dir: None,
            ascii_only: false,
            collision_policy: CollisionPolicy::FirstWins,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with a TOML file when one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = path {
            let file_config = Self::load_from_file(path)?;
            config.merge(file_config);
        }

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<PartialConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        if let Some(val) = other.style {
            self.style = val;
        }
        if let Some(val) = other.extension {
            self.extension = Some(val);
        }
        if let Some(val) = other.max_bytes {
            self.max_bytes = val;
        }
        if let Some(val) = other.recursive {
            self.recursive = val;
        }
        if let Some(val) = other.ascii {
            self.ascii_only = val;
        }
        if let Some(val) = other.collision_policy {
            self.collision_policy = val;
        }
    }

    pub fn stem_options(&self) -> StemOptions {
        StemOptions { style: self.style, max_bytes: self.max_bytes, ascii_only: self.ascii_only }
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialConfig {
    style: Option<Style>,
    extension: Option<String>,
    max_bytes: Option<usize>,
    recursive: Option<bool>,
    ascii: Option<bool>,
    collision_policy: Option<CollisionPolicy>,
}
