//! Lock file encoding and decoding.
//!
//! A lock file is the flattened record of one resolution run for one
//! dependency category, keyed by identity.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{CompileFlags, Identity, PackageNode};
use crate::resolver::errors::ResolveError;

/// Current lock file format version.
pub const LOCK_VERSION: u32 = 1;

const LOCK_HEADER: &str = "# This file is automatically generated by wio.\n\
                           # It is not intended for manual editing.\n\n";

/// One locked package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPackage {
    pub name: String,

    /// The package identity; always equal to the entry's key
    pub hash: Identity,

    /// Package source root
    pub path: PathBuf,

    /// Merged compile flags
    #[serde(default)]
    pub compile_flags: CompileFlags,
}

impl LockedPackage {
    pub fn from_node(node: &PackageNode) -> Self {
        LockedPackage {
            name: node.name.clone(),
            hash: node.identity.clone(),
            path: node.path.clone(),
            compile_flags: node.compile_flags.clone(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.hash
    }
}

/// Flattened identity -> package mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Lock file format version
    pub version: u32,

    #[serde(default)]
    pub packages: BTreeMap<Identity, LockedPackage>,
}

impl Default for LockRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl LockRecord {
    pub fn new() -> Self {
        LockRecord {
            version: LOCK_VERSION,
            packages: BTreeMap::new(),
        }
    }

    /// Add an entry. A second entry under the same identity is a collision.
    pub fn insert(&mut self, package: LockedPackage) -> Result<(), ResolveError> {
        if let Some(existing) = self.packages.get(&package.hash) {
            return Err(ResolveError::IdentityCollision {
                identity: package.hash.to_string(),
                first: existing.path.clone(),
                second: package.path,
            });
        }
        self.packages.insert(package.hash.clone(), package);
        Ok(())
    }

    pub fn get(&self, identity: &Identity) -> Option<&LockedPackage> {
        self.packages.get(identity)
    }

    /// Entries sorted by identity.
    pub fn iter(&self) -> impl Iterator<Item = &LockedPackage> {
        self.packages.values()
    }

    /// Entries resolved directly under a category root.
    pub fn top_level(&self) -> impl Iterator<Item = &LockedPackage> {
        self.iter().filter(|p| p.hash.is_top_level())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Parse a lock file's content.
    pub fn parse(content: &str) -> Result<Self> {
        let record: LockRecord = toml::from_str(content).context("failed to parse lock file")?;

        if record.version != LOCK_VERSION {
            bail!(
                "unsupported lock file version {} (expected {})",
                record.version,
                LOCK_VERSION
            );
        }

        for (key, package) in &record.packages {
            if key != &package.hash {
                bail!(
                    "corrupt lock file: entry `{}` records hash `{}`",
                    key,
                    package.hash
                );
            }
        }

        Ok(record)
    }

    /// Load a lock file from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lock file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Render the lock file, header included.
    pub fn to_toml(&self) -> Result<String> {
        let content = toml::to_string_pretty(self).context("failed to serialize lock file")?;
        Ok(format!("{LOCK_HEADER}{content}"))
    }

    /// Save the lock file, replacing any previous one.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("failed to write lock file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn locked(identity: &str, path: &str, flags: &[&str]) -> LockedPackage {
        let identity = Identity::from_raw(identity);
        LockedPackage {
            name: identity.leaf_name().to_string(),
            hash: identity,
            path: PathBuf::from(path),
            compile_flags: flags.iter().copied().collect(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("packages.lock");

        let mut record = LockRecord::new();
        record
            .insert(locked("Alpha", "/p/lib/vendor/Alpha", &["-O2"]))
            .unwrap();
        record
            .insert(locked("Alpha__Beta", "/p/lib/vendor/Alpha/lib/Beta", &[]))
            .unwrap();
        record.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# This file is automatically generated by wio."));
        assert!(content.contains("[packages.Alpha__Beta]"));
        assert!(content.contains("hash = \"Alpha__Beta\""));

        let loaded = LockRecord::load(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_empty_record() {
        let record = LockRecord::new();
        let content = record.to_toml().unwrap();
        assert!(content.contains("version = 1"));

        let parsed = LockRecord::parse(&content).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_top_level() {
        let mut record = LockRecord::new();
        record.insert(locked("Alpha", "/a", &[])).unwrap();
        record.insert(locked("Alpha__Beta", "/b", &[])).unwrap();
        record.insert(locked("Delta", "/d", &[])).unwrap();

        let top: Vec<_> = record.top_level().map(|p| p.name.as_str()).collect();
        assert_eq!(top, vec!["Alpha", "Delta"]);
    }

    #[test]
    fn test_insert_collision() {
        let mut record = LockRecord::new();
        record.insert(locked("Alpha", "/vendor/Alpha", &[])).unwrap();

        let err = record.insert(locked("Alpha", "/remote/Alpha", &[])).unwrap_err();
        assert!(matches!(err, ResolveError::IdentityCollision { .. }));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_mismatched_hash_rejected() {
        let content = r#"
version = 1

[packages.Alpha]
name = "Alpha"
hash = "Beta"
path = "/p/Alpha"
"#;
        let err = LockRecord::parse(content).unwrap_err();
        assert!(err.to_string().contains("corrupt lock file"));
    }

    #[test]
    fn test_unsupported_version() {
        assert!(LockRecord::parse("version = 99\n").is_err());
    }
}
