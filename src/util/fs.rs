//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Remove a file, if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Immediate subdirectories of `dir` that can hold a package, sorted by
/// file name.
///
/// Hidden entries (leading `.`) and regular files are skipped. Symlinks to
/// directories count as directories.
pub fn list_package_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_dangling_link(&err) => {
                tracing::debug!("skipping dangling link {:?}", err.path());
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if is_hidden(entry.file_name().to_string_lossy().as_ref()) {
            continue;
        }
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    let is_link = err
        .path()
        .and_then(|p| fs::symlink_metadata(p).ok())
        .is_some_and(|m| m.file_type().is_symlink());
    not_found && is_link
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// `path` relative to `base` for display, or `path` itself when no relative
/// form exists.
pub fn display_relative(base: &Path, path: &Path) -> PathBuf {
    match pathdiff::diff_paths(path, base) {
        Some(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Some(rel) => rel,
        None => path.to_path_buf(),
    }
}

/// Render a path with forward slashes, as build tools expect.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
