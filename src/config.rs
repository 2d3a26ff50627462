//! Configuration System
//!
//! Settings come from built-in defaults, optionally overlaid by a single TOML
//! file named on the command line. No file is searched for implicitly and no
//! environment variables are read.

use crate::error::FlattenError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeflatConfig {
    /// Behaviour of flatten/unflatten runs
    #[serde(default)]
    pub run: RunOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Per-run switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Plan and report without writing any files
    #[serde(default)]
    pub dry_run: bool,

    /// Skip flat names without a numeric sequence prefix instead of copying
    /// them through unchanged
    #[serde(default)]
    pub strict_decode: bool,
}

/// Loads [`TreeflatConfig`] from defaults and an optional file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults only.
    pub fn load_defaults() -> Result<TreeflatConfig, FlattenError> {
        Ok(Self::builder_with_defaults()?.build()?.try_deserialize()?)
    }

    /// Defaults overlaid with the TOML file at `path`, which must exist.
    pub fn load_from_file(path: &Path) -> Result<TreeflatConfig, FlattenError> {
        if !path.is_file() {
            return Err(FlattenError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let path_str = path.to_str().ok_or_else(|| {
            FlattenError::Config(format!("Config path is not valid UTF-8: {}", path.display()))
        })?;

        let config = Self::builder_with_defaults()?
            .add_source(File::new(path_str, FileFormat::Toml).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from `path` when given, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<TreeflatConfig, FlattenError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_defaults(),
        }
    }

    fn builder_with_defaults(
    ) -> Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("run.dry_run", false)?
            .set_default("run.strict_decode", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "stderr")
    }
}
