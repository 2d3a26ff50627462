//! CLI parse: clap types for treeflat. No behavior; definitions only.

use crate::cli::presentation::ReportFormat;
use crate::run::Mode;
use clap::Parser;
use std::path::PathBuf;

/// Treeflat CLI - reversibly flatten a directory tree
#[derive(Parser, Debug)]
#[command(name = "treeflat")]
#[command(about = "Flatten a directory tree into encoded file names, or rebuild it")]
pub struct Cli {
    /// encrypt flattens SOURCE into DEST; decrypt rebuilds the tree
    #[arg(value_enum)]
    pub mode: Mode,

    /// Source directory
    pub source: PathBuf,

    /// Destination directory (created if missing)
    pub destination: PathBuf,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// In decrypt mode, skip files without a numeric sequence prefix
    #[arg(long)]
    pub strict_decode: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
