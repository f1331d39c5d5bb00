//! The build-order record.
//!
//! A newline-delimited list of artifact directories. A package's directory
//! always comes after the directories of all its dependencies, so building
//! the list top to bottom never starts a package before its inputs exist.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::{read_to_string, to_forward_slashes, write_string};

/// Ordered artifact directories, dependencies first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOrder {
    dirs: Vec<PathBuf>,
}

impl BuildOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, dir: PathBuf) {
        self.dirs.push(dir);
    }

    pub fn extend(&mut self, other: BuildOrder) {
        self.dirs.extend(other.dirs);
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Position of a directory in the order.
    pub fn position(&self, dir: &Path) -> Option<usize> {
        self.dirs.iter().position(|d| d == dir)
    }

    /// File content: one directory per line.
    pub fn to_file_content(&self) -> String {
        let mut out = String::new();
        for dir in &self.dirs {
            out.push_str(&to_forward_slashes(dir));
            out.push('\n');
        }
        out
    }

    /// Replace the build-order file with this order.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_string(path, &self.to_file_content())
    }

    /// Read a build-order file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        BuildOrder {
            dirs: content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(PathBuf::from)
                .collect(),
        }
    }
}
