//! CLI route: run context that turns parsed arguments into a flatten or
//! unflatten run and renders the report.

use crate::cli::parse::Cli;
use crate::cli::presentation::format_report;
use crate::config::{ConfigLoader, RunOptions, TreeflatConfig};
use crate::error::FlattenError;
use crate::run::{FlattenRun, Mode, UnflattenRun};
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution.
pub struct RunContext {
    config: TreeflatConfig,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from an optional config path.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, FlattenError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn config(&self) -> &TreeflatConfig {
        &self.config
    }

    /// Run options from the config file with CLI flags applied on top.
    pub fn run_options(&self, cli: &Cli) -> RunOptions {
        let mut options = self.config.run.clone();
        if cli.dry_run {
            options.dry_run = true;
        }
        if cli.strict_decode {
            options.strict_decode = true;
        }
        options
    }

    /// Execute the run described by `cli` and return the rendered report.
    pub fn execute(&self, cli: &Cli) -> Result<String, FlattenError> {
        let options = self.run_options(cli);
        info!(
            mode = ?cli.mode,
            source = %cli.source.display(),
            destination = %cli.destination.display(),
            config = ?self.config_path,
            dry_run = options.dry_run,
            "Starting run"
        );

        let report = match cli.mode {
            Mode::Encrypt => {
                FlattenRun::new(&cli.source, &cli.destination, options)?.execute()?
            }
            Mode::Decrypt => {
                UnflattenRun::new(&cli.source, &cli.destination, options)?.execute()?
            }
        };

        format_report(&report, cli.format)
    }
}
