//! Configuration file support for ferro-gene-matcher.
//!
//! This module loads `.ferro-genes.toml` configuration files, which name
//! the reference dataset and set output and logging defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [reference]
//! path = "data/gene_info.tsv.gz"
//!
//! [output]
//! directory = "results"
//!
//! [maf]
//! suffix = "_hugofix.maf"
//! drop_unmatched = false
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-genes.toml` in current directory
//! 2. `~/.config/ferro/genes.toml`
//!
//! CLI flags take precedence over config file settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GeneMatchError;
use crate::maf::DEFAULT_MAF_SUFFIX;

/// Config file name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = ".ferro-genes.toml";

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneMatcherConfig {
    /// Reference dataset section.
    pub reference: ReferenceConfig,
    /// Match export section.
    pub output: OutputConfig,
    /// MAF update section.
    pub maf: MafConfig,
    /// Logging section.
    pub logging: LoggingConfig,
}

/// Reference dataset section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Tab-separated gene table, optionally gzip-compressed.
    pub path: Option<PathBuf>,
}

/// Match export section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `_full`, `_converted` and `_failed` files.
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// MAF update section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MafConfig {
    /// Suffix replacing the input extension when no output path is given.
    pub suffix: String,
    /// Drop rows that stay unresolved.
    pub drop_unmatched: bool,
}

impl Default for MafConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_MAF_SUFFIX.to_string(),
            drop_unmatched: false,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `ferro_gene_matcher=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--reference`
    pub reference: Option<PathBuf>,
    /// `--output-dir`
    pub output_dir: Option<PathBuf>,
    /// `--drop-unmatched`
    pub drop_unmatched: bool,
    /// `--log-level`
    pub log_level: Option<String>,
}

impl GeneMatcherConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-genes.toml` in current directory
    /// 2. `~/.config/ferro/genes.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if cwd_config.exists() {
            if let Ok(config) = Self::load_from_path(&cwd_config) {
                return Some(config);
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro").join("genes.toml");
            if home_config.exists() {
                if let Ok(config) = Self::load_from_path(&home_config) {
                    return Some(config);
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, GeneMatchError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneMatchError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, GeneMatchError> {
        toml::from_str(content)
            .map_err(|e| GeneMatchError::configuration(format!("config parse error: {}", e)))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, GeneMatchError> {
        toml::to_string_pretty(self)
            .map_err(|e| GeneMatchError::configuration(format!("config render error: {}", e)))
    }

    /// Write as TOML to `path`.
    pub fn to_file(&self, path: &Path) -> Result<(), GeneMatchError> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Self {
        let mut config = self.clone();
        if let Some(reference) = &cli.reference {
            config.reference.path = Some(reference.clone());
        }
        if let Some(dir) = &cli.output_dir {
            config.output.directory = dir.clone();
        }
        if cli.drop_unmatched {
            config.maf.drop_unmatched = true;
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        config
    }

    /// The reference path, which must be set by file or flag.
    pub fn reference_path(&self) -> Result<&Path, GeneMatchError> {
        self.reference.path.as_deref().ok_or_else(|| {
            GeneMatchError::configuration(format!(
                "no reference dataset: pass --reference or set [reference] path in {}",
                LOCAL_CONFIG_FILE
            ))
        })
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
