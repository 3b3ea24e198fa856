//! File system utilities.

use crate::models::report::TeardownReport;
use crate::Result;
use std::path::Path;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Remove every entry inside `dir`, keeping `dir` itself.
///
/// Entries whose file name is in `keep` are left in place. Directories are
/// removed recursively; counts only cover the top-level entries removed.
pub fn clear_directory(dir: &Path, keep: &[&str]) -> Result<TeardownReport> {
    let mut report = TeardownReport::default();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if keep.iter().any(|k| name.as_os_str() == *k) {
            continue;
        }

        let path = entry.path();
        // file_type() does not follow symlinks, so a link to a directory is
        // removed as a file rather than traversed.
        if entry.file_type()?.is_dir() {
            std::fs::remove_dir_all(&path)?;
            report.removed_dirs += 1;
        } else {
            std::fs::remove_file(&path)?;
            report.removed_files += 1;
        }
        tracing::debug!("Removed {}", path.display());
    }

    Ok(report)
}

/// Check that files can be created in `dir`, creating it if needed.
pub fn check_writable(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    ensure_directory(dir)?;
    let probe = dir.join(".strm-mounter-probe");
    std::fs::write(&probe, b"")?;
    std::fs::remove_file(&probe)?;
    Ok(())
}
