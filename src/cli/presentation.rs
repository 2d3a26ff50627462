//! CLI presentation: text and json formatters for run reports.

use crate::error::FlattenError;
use crate::run::{Mode, RunReport};
use clap::ValueEnum;

/// How the run report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

pub fn format_report(report: &RunReport, format: ReportFormat) -> Result<String, FlattenError> {
    match format {
        ReportFormat::Json => format_report_json(report),
        ReportFormat::Text => Ok(format_report_text(report)),
    }
}

pub fn format_report_json(report: &RunReport) -> Result<String, FlattenError> {
    serde_json::to_string_pretty(report).map_err(|e| FlattenError::Config(e.to_string()))
}

pub fn format_report_text(report: &RunReport) -> String {
    let verb = match (report.mode, report.dry_run) {
        (Mode::Encrypt, false) => "Flattened",
        (Mode::Decrypt, false) => "Restored",
        (Mode::Encrypt, true) => "Would flatten",
        (Mode::Decrypt, true) => "Would restore",
    };

    let mut s = if report.dry_run {
        format!("{} {} file(s)", verb, report.copies.len())
    } else {
        format!(
            "{} {} file(s), {} bytes",
            verb,
            report.copies.len(),
            report.bytes_copied
        )
    };

    for copy in &report.copies {
        s.push_str(&format!("\n  {} -> {}", copy.source, copy.target));
    }

    if !report.skipped.is_empty() {
        s.push_str(&format!("\n\nSkipped ({}):", report.skipped.len()));
        for skipped in &report.skipped {
            s.push_str(&format!("\n  - {} ({})", skipped.source, skipped.reason));
        }
    }
    s
}
