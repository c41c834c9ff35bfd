//! Render command implementation

use std::path::Path;

use colored::Colorize;

use render_core::{FileStatus, ManagedFile, RenderJob};
use render_fs::{ConfigStore, FileMode, NormalizedPath};

use crate::cli::SourceArgs;
use crate::error::Result;

/// Build a render job from the template, values files and overrides.
pub(crate) fn job_for(source: &SourceArgs) -> RenderJob {
    RenderJob::new(NormalizedPath::new(&source.template))
        .with_values(source.values.iter().map(NormalizedPath::new))
        .with_overrides(source.set.iter().cloned())
}

/// Render `source` and bind the result to `target`.
pub(crate) fn managed_file(source: &SourceArgs, target: &Path, mode: FileMode) -> Result<ManagedFile> {
    let store = ConfigStore::new();
    let file = job_for(source)
        .with_target(NormalizedPath::new(target))
        .with_mode(mode)
        .managed_file(&store)?;
    Ok(file)
}

/// Run the render command
///
/// Without an output file the rendering goes to stdout as is.
pub fn run_render(source: &SourceArgs, output: Option<&Path>, mode: FileMode) -> Result<()> {
    let Some(output) = output else {
        let rendered = job_for(source).render(&ConfigStore::new())?;
        tracing::debug!(checksum = %rendered.checksum, "rendered to stdout");
        print!("{}", rendered.text);
        return Ok(());
    };

    let file = managed_file(source, output, mode)?;
    let status = file.update()?;
    match status {
        FileStatus::UpToDate => println!(
            "{} {} is up to date.",
            "OK".green().bold(),
            file.target.as_str().cyan()
        ),
        _ => println!(
            "{} {} ({}, mode {})",
            "Wrote".green().bold(),
            file.target.as_str().cyan(),
            status,
            file.mode
        ),
    }
    Ok(())
}
