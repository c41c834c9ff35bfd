//! Deployment manifest (`render.toml`)
//!
//! ```toml
//! values = ["values/common.toml", "values/production.yaml"]
//!
//! [[file]]
//! template = "templates/config.local.php"
//! target = "/etc/postfixadmin/config.local.php"
//! mode = "0600"
//! values = ["values/postfixadmin.toml"]
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use serde::{Deserialize, Serialize};

use render_fs::{FileMode, NormalizedPath, io};

use crate::job::RenderJob;
use crate::{Error, Result};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "render.toml";

/// One managed file in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub template: String,
    pub target: String,
    #[serde(default)]
    pub mode: FileMode,
    /// Values files layered on top of the manifest-wide ones
    #[serde(default)]
    pub values: Vec<String>,
}

/// Parsed deployment manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Values files shared by every entry
    #[serde(default)]
    pub values: Vec<String>,

    #[serde(default, rename = "file")]
    pub files: Vec<FileEntry>,

    /// Directory relative paths resolve against
    #[serde(skip)]
    base: Option<NormalizedPath>,
}

impl Manifest {
    /// Parse a manifest from TOML content, resolving paths against `base`.
    pub fn parse(content: &str, base: Option<NormalizedPath>) -> Result<Self> {
        let mut manifest: Manifest = toml::from_str(content)?;
        manifest.base = base;
        Ok(manifest)
    }

    /// Load a manifest file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }
        let content = io::read_text(path)?;
        let manifest = Self::parse(&content, path.parent())?;
        manifest.validate(path)?;
        tracing::debug!(manifest = %path, files = manifest.files.len(), "loaded manifest");
        Ok(manifest)
    }

    fn validate(&self, path: &NormalizedPath) -> Result<()> {
        let mut targets = std::collections::HashSet::new();
        for entry in &self.files {
            let target = self.resolve(&entry.target);
            if !targets.insert(target.clone()) {
                return Err(Error::InvalidManifest {
                    path: path.to_native(),
                    message: format!("target {} is managed more than once", target),
                });
            }
        }
        Ok(())
    }

    fn resolve(&self, raw: &str) -> NormalizedPath {
        let path = NormalizedPath::new(raw);
        match &self.base {
            Some(base) => path.resolve_against(base),
            None => path,
        }
    }

    /// One render job per file entry, in manifest order.
    pub fn jobs(&self, overrides: &[String]) -> Vec<RenderJob> {
        self.files
            .iter()
            .map(|entry| {
                RenderJob::new(self.resolve(&entry.template))
                    .with_values(self.values.iter().map(|v| self.resolve(v)))
                    .with_values(entry.values.iter().map(|v| self.resolve(v)))
                    .with_overrides(overrides.iter().cloned())
                    .with_target(self.resolve(&entry.target))
                    .with_mode(entry.mode)
            })
            .collect()
    }
}
