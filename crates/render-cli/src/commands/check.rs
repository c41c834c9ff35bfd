//! Check command implementation

use std::path::Path;

use colored::Colorize;

use render_core::{CheckReport, CheckStatus};
use render_fs::FileMode;

use super::render::managed_file;
use super::status_label;
use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Run the check command
///
/// Fails when the target is missing or differs from the rendering.
pub fn run_check(source: &SourceArgs, target: &Path, mode: FileMode) -> Result<()> {
    let file = managed_file(source, target, mode)?;
    let report = CheckReport::collect([&file])?;
    print_report(&report);

    match report.status {
        CheckStatus::Healthy => Ok(()),
        CheckStatus::Missing => Err(CliError::user(format!("{} is missing", file.target))),
        CheckStatus::Drifted => Err(CliError::user(format!(
            "{} differs from its rendering",
            file.target
        ))),
    }
}

fn print_report(report: &CheckReport) {
    if report.is_healthy() {
        println!("{} No drift detected.", "OK".green().bold());
        return;
    }
    for item in report.missing.iter().chain(&report.drifted) {
        println!(
            "   {} {} ({}): {}",
            status_label(item.status),
            item.file.cyan(),
            item.source.dimmed(),
            item.status
        );
    }
}
