//! Command implementations for render-cli

pub mod apply;
pub mod check;
pub mod diff;
pub mod placeholders;
pub mod postfixadmin;
pub mod render;

pub use apply::run_apply;
pub use check::run_check;
pub use diff::run_diff;
pub use placeholders::run_placeholders;
pub use postfixadmin::run_postfixadmin;
pub use render::run_render;

use colored::{ColoredString, Colorize};

use render_core::FileStatus;

/// Short colored label for a file status.
pub(crate) fn status_label(status: FileStatus) -> ColoredString {
    match status {
        FileStatus::UpToDate => "OK".green().bold(),
        FileStatus::Missing => "MISSING".yellow().bold(),
        FileStatus::ContentDrift => "DRIFTED".red().bold(),
        FileStatus::ModeDrift => "MODE".red().bold(),
    }
}
