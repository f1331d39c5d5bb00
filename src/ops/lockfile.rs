//! Lock file I/O operations.

use std::path::Path;

use anyhow::Result;

use crate::resolver::LockRecord;
use crate::util::fs::ensure_dir;

/// Load a lock file, treating a missing file as an empty record.
pub fn load_lockfile(path: &Path) -> Result<LockRecord> {
    if !path.exists() {
        tracing::debug!("no lock file at {}", path.display());
        return Ok(LockRecord::new());
    }

    LockRecord::load(path)
}

/// Save a lock record, replacing the previous lock file.
pub fn save_lockfile(path: &Path, record: &LockRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    record.save(path)
}
