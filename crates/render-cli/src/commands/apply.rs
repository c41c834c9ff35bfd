//! Apply command implementation

use std::path::Path;

use colored::Colorize;

use render_core::{ApplyReport, Deployment, Manifest};
use render_fs::{ConfigStore, NormalizedPath};

use super::status_label;
use crate::error::Result;

/// Run the apply command
///
/// Renders every file of the manifest, then writes the ones that changed.
pub fn run_apply(manifest: &Path, set: &[String], dry_run: bool, json: bool) -> Result<()> {
    let manifest_path = NormalizedPath::new(manifest);
    let manifest = Manifest::load(&manifest_path)?;
    let deployment = Deployment::from_manifest(&manifest, set, &ConfigStore::new())?;
    let report = deployment.apply(dry_run)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &manifest_path);
    }
    Ok(())
}

fn print_report(report: &ApplyReport, manifest: &NormalizedPath) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    println!(
        "{}{} {}",
        prefix.dimmed(),
        "Applying".blue().bold(),
        manifest.as_str().yellow()
    );

    for action in &report.actions {
        let verb = match (action.status.needs_update(), report.dry_run) {
            (false, _) => "unchanged",
            (true, true) => "would update",
            (true, false) => "updated",
        };
        println!(
            "   {} {} ({}): {}",
            status_label(action.status),
            action.target.cyan(),
            action.source.dimmed(),
            verb
        );
    }

    if !report.has_changes() {
        println!("{} All files are up to date.", "OK".green().bold());
    }
}
