//! PostfixAdmin command implementation

use std::path::Path;

use colored::Colorize;

use render_fs::{ConfigStore, FileMode, NormalizedPath};
use render_postfixadmin::{Doveadm, PostfixAdmin, PostfixAdminSettings};

use super::status_label;
use crate::error::Result;

/// Run the postfixadmin command
///
/// `doveadm` overrides the binary named in the settings file.
pub fn run_postfixadmin(
    settings: &Path,
    target: &Path,
    doveadm: Option<&Path>,
    mode: FileMode,
    dry_run: bool,
) -> Result<()> {
    let settings: PostfixAdminSettings = ConfigStore::new().load(&NormalizedPath::new(settings))?;
    let hasher = match doveadm {
        Some(program) => Doveadm::new(program),
        None => Doveadm::new(&settings.doveadm),
    };

    let component = PostfixAdmin::new(settings);
    let file = component.managed_file(NormalizedPath::new(target), mode, &hasher)?;
    let status = if dry_run { file.verify()? } else { file.update()? };

    let verb = match (status.needs_update(), dry_run) {
        (false, _) => "unchanged",
        (true, true) => "would update",
        (true, false) => "updated",
    };
    println!(
        "{} {}: {} ({})",
        status_label(status),
        file.target.as_str().cyan(),
        verb,
        status
    );
    Ok(())
}
