//! Mirror writes: keep the destination tree identical to the source
//!
//! I/O failures in this module are pass-fatal and propagate to the host;
//! a half-written mirror must not be reported as a successful build.

use std::fs;
use std::path::Path;

use color_eyre::Result;
use walkdir::WalkDir;

/// Create `path` (and its parent directories) as an empty file if absent.
///
/// Guarantees the mirror path exists even if a later content copy fails
/// partway.
///
/// # Errors
/// Returns an error if the parents or the file cannot be created.
pub fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs::File::create(path)?;
    }
    Ok(())
}

/// Copy a single file, creating parent directories. Returns bytes copied.
///
/// # Errors
/// Returns an error if the source cannot be read or the destination
/// cannot be written.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::copy(src, dest)?)
}

/// Recursively copy a directory tree verbatim.
///
/// # Errors
/// Returns an error if traversal or any individual copy fails.
pub fn copy_dir_all(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Delete a file or a whole directory tree. Missing paths are a no-op.
///
/// # Errors
/// Returns an error if an existing path cannot be deleted.
pub fn remove_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
