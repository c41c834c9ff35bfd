//! [`TestDeployment`] builder for renderer test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary deployment directory holding templates, values files and a
/// manifest, with helpers for asserting on rendered targets.
///
/// # Example
///
/// ```rust,no_run
/// use render_test_utils::{TestDeployment, fixtures};
///
/// let deploy = TestDeployment::new()
///     .with_file("templates/db.php", fixtures::DB_TEMPLATE)
///     .with_file("values.toml", fixtures::DB_VALUES_TOML)
///     .with_manifest(&["values.toml"], &[("templates/db.php", "out/db.php")]);
/// deploy.assert_file_not_exists("out/db.php");
/// ```
pub struct TestDeployment {
    temp_dir: TempDir,
}

impl Default for TestDeployment {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDeployment {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the deployment.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    /// Write a `render.toml` with shared values and `(template, target)` entries.
    pub fn with_manifest(self, values: &[&str], files: &[(&str, &str)]) -> Self {
        let quoted = values
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join(", ");
        let mut manifest = format!("values = [{quoted}]\n");
        for (template, target) in files {
            manifest.push_str(&format!(
                "\n[[file]]\ntemplate = \"{template}\"\ntarget = \"{target}\"\n"
            ));
        }
        self.write("render.toml", &manifest);
        self
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `relative` exists.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert the permission bits of `relative` (unix only, no-op elsewhere).
    pub fn assert_mode(&self, relative: &str, expected: u32) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(self.path(relative)).unwrap().permissions().mode() & 0o7777;
            assert_eq!(
                mode, expected,
                "Expected mode {:04o} for {}, got {:04o}",
                expected, relative, mode
            );
        }
        #[cfg(not(unix))]
        let _ = (relative, expected);
    }
}
