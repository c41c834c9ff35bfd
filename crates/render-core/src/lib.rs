//! Managed files and deployments for the config renderer
//!
//! - **managed**: a rendered file bound to its target, with verify/update
//! - **check**: aggregated drift reports
//! - **job**: one template + values + overrides -> one rendering
//! - **manifest**: `render.toml`, the list of files a deployment manages
//! - **deploy**: render everything first, then update what drifted

pub mod check;
pub mod deploy;
pub mod error;
pub mod job;
pub mod managed;
pub mod manifest;

pub use check::{CheckReport, CheckStatus, DriftItem};
pub use deploy::{ApplyReport, Deployment, FileAction};
pub use error::{Error, Result};
pub use job::RenderJob;
pub use managed::{FileStatus, ManagedFile};
pub use manifest::{FileEntry, MANIFEST_FILE, Manifest};
