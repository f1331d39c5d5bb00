//! Removal of generated target output.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::Project;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove one target's generated files, or every target's when `target` is
/// `None`. Lock files are kept.
///
/// Returns the directories that existed and were removed.
pub fn clean(project: &Project, target: Option<&str>) -> Result<Vec<PathBuf>> {
    match target {
        Some(name) => {
            let name = project.select_target(name)?.name.clone();
            clean_target(project, &name)
        }
        None => remove(project.targets_dir()),
    }
}

/// Remove the output directory of a target by its resolved name.
pub(crate) fn clean_target(project: &Project, target: &str) -> Result<Vec<PathBuf>> {
    remove(project.target_dir(target))
}

fn remove(dir: PathBuf) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    remove_dir_all_if_exists(&dir)?;
    tracing::info!("Removed {}", dir.display());
    Ok(vec![dir])
}
