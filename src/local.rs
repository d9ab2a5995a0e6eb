//! Local filesystem facade: every operation the shell offers on the local
//! side, kept as thin wrappers over `std::fs` so failures carry the path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{self, FileEntry};

/// Read one directory into sorted entries
pub fn list_directory(path: &Path) -> Result<Vec<FileEntry>> {
    let mut items = Vec::new();

    let entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read local directory '{}'", path.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let name = entry.file_name().to_string_lossy().to_string();
        let metadata = entry.metadata().context("Failed to read file metadata")?;

        if metadata.is_dir() {
            items.push(FileEntry::Directory { name });
        } else {
            items.push(FileEntry::File {
                name,
                size: metadata.len(),
            });
        }
    }

    types::sort_entries(&mut items);
    Ok(items)
}

/// Join a possibly-relative user path onto the shell's local directory
pub fn resolve(current: &Path, target: &str) -> PathBuf {
    let path = Path::new(target);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        current.join(path)
    }
}

/// Resolve and verify a change-directory target; the caller commits on Ok
pub fn change_directory(current: &Path, target: &str) -> Result<PathBuf> {
    let resolved = resolve(current, target)
        .canonicalize()
        .with_context(|| format!("No such directory: '{}'", target))?;
    if !resolved.is_dir() {
        anyhow::bail!("Not a directory: '{}'", target);
    }
    Ok(resolved)
}

/// Create a directory; one that already exists is not an error
pub fn create_directory(path: &Path) -> Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to create '{}'", path.display()))
        }
    }
}

/// Remove a file or an empty directory (never recursive)
pub fn remove(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("No such file or directory: '{}'", path.display()))?;
    let result = if metadata.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    result.with_context(|| format!("Failed to remove '{}'", path.display()))
}

/// Rename or move within the local filesystem
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).with_context(|| {
        format!("Failed to move '{}' to '{}'", from.display(), to.display())
    })
}
