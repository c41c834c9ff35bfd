//! Diff command implementation
//!
//! Previews what rendering to the target would change.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use render_core::FileStatus;
use render_fs::FileMode;

use super::render::managed_file;
use crate::cli::SourceArgs;
use crate::error::Result;

/// Run the diff command
pub fn run_diff(source: &SourceArgs, target: &Path, mode: FileMode, json: bool) -> Result<()> {
    let file = managed_file(source, target, mode)?;
    let status = file.verify()?;
    let diff = file.diff()?;

    if json {
        let json_output = json!({
            "target": file.target.as_str(),
            "status": status,
            "has_changes": status.needs_update(),
            "similarity": diff.similarity,
            "changes": diff.changes,
            "unified": diff.unified,
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    match status {
        FileStatus::UpToDate => {
            println!(
                "{} No changes needed. {} matches its rendering.",
                "OK".green().bold(),
                file.target.as_str().cyan()
            );
        }
        FileStatus::ModeDrift => {
            println!(
                "{} {} content matches, mode would be set to {}",
                "~".yellow().bold(),
                file.target.as_str().cyan(),
                file.mode
            );
        }
        FileStatus::Missing | FileStatus::ContentDrift => print_unified(&diff.unified),
    }
    Ok(())
}

fn print_unified(unified: &str) {
    for line in unified.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}
