//! Atomic writes serialized per target

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use fs2::FileExt;

use crate::{Error, FileMode, NormalizedPath, Result};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write content atomically to a file with the given permission mode.
///
/// Writers of the same target take an exclusive lock on the sibling
/// `.<name>.lock` file, so concurrent renders run one after the other. The
/// content goes to a temp file in the same directory that carries `mode`
/// before any byte is written, and is then renamed over the target.
/// Readers see either the old file or the complete new one.
///
/// The lock file is left in place for the next writer.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], mode: FileMode) -> Result<()> {
    let native_path = path.to_native();
    let Some(file_name) = native_path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Err(Error::io(
            &native_path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock_path = native_path.with_file_name(format!(".{}.lock", file_name));
    let mut lock_options = OpenOptions::new();
    lock_options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        lock_options.mode(FileMode::OWNER_ONLY.bits());
    }
    let lock_file = lock_options
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    lock_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let result = replace_file(&native_path, &file_name, content, mode);
    // Dropping the handle releases the lock as well
    let _ = fs2::FileExt::unlock(&lock_file);
    result?;

    tracing::debug!(path = %path, mode = %mode, bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Write `content` to a fresh temp file next to `target` and rename it over.
fn replace_file(target: &Path, file_name: &str, content: &[u8], mode: FileMode) -> Result<()> {
    let temp_path = target.with_file_name(format!(
        ".{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode.bits());
    }
    let mut temp_file = options
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let outcome = (|| {
        // umask may have narrowed the creation mode
        mode.apply(&temp_path)?;
        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;
        temp_file
            .sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;
        fs::rename(&temp_path, target).map_err(|e| Error::io(target, e))
    })();

    if outcome.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    outcome
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a file's raw bytes, `None` if it does not exist.
///
/// Targets may hold anything, including bytes that are not UTF-8.
pub fn read_optional(path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
    let native_path = path.to_native();
    match fs::read(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Like [`read_optional`], decoding invalid UTF-8 lossily.
pub fn read_optional_lossy(path: &NormalizedPath) -> Result<Option<String>> {
    Ok(read_optional(path)?.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}
