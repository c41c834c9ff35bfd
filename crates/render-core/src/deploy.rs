//! Deployment engine
//!
//! Every file of a manifest is rendered before anything is written, so a
//! single unresolved placeholder aborts the deployment with all targets
//! untouched.

use serde::Serialize;

use render_fs::ConfigStore;

use crate::check::CheckReport;
use crate::job::RenderJob;
use crate::managed::{FileStatus, ManagedFile};
use crate::manifest::Manifest;
use crate::Result;

/// What apply did (or would do) to one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAction {
    pub source: String,
    pub target: String,
    /// Status before applying
    pub status: FileStatus,
    /// Whether the target was written or had its mode fixed
    pub applied: bool,
}

/// Report from an apply run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub dry_run: bool,
    pub actions: Vec<FileAction>,
}

impl ApplyReport {
    /// Actions for targets that were (or would be) changed.
    pub fn changes(&self) -> impl Iterator<Item = &FileAction> {
        self.actions.iter().filter(|a| a.status.needs_update())
    }

    pub fn has_changes(&self) -> bool {
        self.changes().next().is_some()
    }
}

/// A set of fully rendered files ready to be checked or applied.
#[derive(Debug, Clone)]
pub struct Deployment {
    files: Vec<ManagedFile>,
}

impl Deployment {
    /// Render every job. Fails on the first job that cannot be rendered.
    pub fn plan(jobs: &[RenderJob], store: &ConfigStore) -> Result<Self> {
        let files = jobs
            .iter()
            .map(|job| job.managed_file(store))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(files = files.len(), "planned deployment");
        Ok(Self { files })
    }

    /// Render every file of a manifest.
    pub fn from_manifest(manifest: &Manifest, overrides: &[String], store: &ConfigStore) -> Result<Self> {
        Self::plan(&manifest.jobs(overrides), store)
    }

    pub fn files(&self) -> &[ManagedFile] {
        &self.files
    }

    /// Verify every target against its rendering.
    pub fn check(&self) -> Result<CheckReport> {
        CheckReport::collect(&self.files)
    }

    /// Update every target that is not up to date, in manifest order.
    ///
    /// Rendering already happened in [`Deployment::plan`], so only I/O can
    /// fail here. The first failing write stops the run: targets before it
    /// stay updated, the failing and later targets are left as they were,
    /// and no report is returned. Re-running after fixing the cause picks up
    /// the remaining files and reports the updated ones as up to date.
    pub fn apply(&self, dry_run: bool) -> Result<ApplyReport> {
        let mut report = ApplyReport {
            dry_run,
            actions: Vec::with_capacity(self.files.len()),
        };

        for file in &self.files {
            let status = if dry_run {
                file.verify()?
            } else {
                file.update()?
            };
            if dry_run && status.needs_update() {
                tracing::info!(path = %file.target, %status, "[dry-run] would update");
            }
            report.actions.push(FileAction {
                source: file.source.clone(),
                target: file.target.to_string(),
                status,
                applied: !dry_run && status.needs_update(),
            });
        }

        Ok(report)
    }
}
