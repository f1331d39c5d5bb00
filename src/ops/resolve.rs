//! Project resolution operations.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{DependencyCategory, Project};
use crate::ops::lockfile::save_lockfile;
use crate::resolver::{DependencyForest, DependencyGraphBuilder, LockRecord};

/// The resolved state of one dependency category.
#[derive(Debug, Clone)]
pub struct ResolvedCategory {
    pub category: DependencyCategory,
    pub forest: DependencyForest,
    pub record: LockRecord,
    /// Where the lock record was written
    pub lockfile: PathBuf,
}

/// Resolve one category without touching the lock file.
pub fn resolve_category(
    project: &Project,
    category: &DependencyCategory,
) -> Result<ResolvedCategory> {
    tracing::info!("Resolving {}", category.name);

    let builder = DependencyGraphBuilder::for_category(project.root(), category);
    let overrides = project.manifest().dependency_overrides();

    let forest = builder
        .build(&overrides)
        .with_context(|| format!("failed to resolve {} of `{}`", category.name, project.name()))?;
    let record = forest.to_lock_record()?;

    Ok(ResolvedCategory {
        category: category.clone(),
        forest,
        record,
        lockfile: project.lockfile_path(category),
    })
}

/// Resolve every category from scratch and rewrite their lock files.
///
/// Nothing is written unless every category resolves.
pub fn resolve_project(
    project: &Project,
    categories: &[DependencyCategory],
) -> Result<Vec<ResolvedCategory>> {
    let resolved = categories
        .iter()
        .map(|category| resolve_category(project, category))
        .collect::<Result<Vec<_>>>()?;

    for rc in &resolved {
        save_lockfile(&rc.lockfile, &rc.record)?;
        tracing::info!(
            "Locked {} {} in {}",
            rc.record.len(),
            rc.category.name,
            rc.lockfile.display()
        );
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::lockfile::load_lockfile;
    use crate::resolver::ResolveError;
    use crate::test_support::{PackageFixture, ProjectFixture};

    #[test]
    fn test_resolve_writes_lockfile() {
        let fixture = ProjectFixture::new("blink")
            .override_flags("Alpha", &["-O2"])
            .vendor(PackageFixture::new("Alpha").nested(PackageFixture::new("Beta")));
        let (_tmp, root) = fixture.write();
        let project = fixture.load(&root);

        let resolved = resolve_project(&project, &[DependencyCategory::packages()]).unwrap();
        assert_eq!(resolved.len(), 1);

        let record = load_lockfile(&root.join(".build/packages.lock")).unwrap();
        assert_eq!(record, resolved[0].record);
        assert_eq!(record.len(), 2);

        let alpha = record.get(&crate::core::Identity::root("Alpha")).unwrap();
        assert_eq!(alpha.compile_flags.as_slice(), ["-O2"]);
        let beta = record
            .get(&crate::core::Identity::from_raw("Alpha__Beta"))
            .unwrap();
        assert!(beta.compile_flags.is_empty());
    }

    #[test]
    fn test_resolve_empty_project() {
        let fixture = ProjectFixture::new("blink");
        let (_tmp, root) = fixture.write();
        let project = fixture.load(&root);

        let resolved = resolve_project(&project, &[DependencyCategory::packages()]).unwrap();
        assert!(resolved[0].forest.is_empty());
        assert!(load_lockfile(&root.join(".build/packages.lock"))
            .unwrap()
            .is_empty());
        assert!(root.join(".build/packages.lock").exists());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let fixture = ProjectFixture::new("blink")
            .vendor(PackageFixture::new("Zeta").flags(&["-DZ"]))
            .vendor(PackageFixture::new("Alpha").nested(PackageFixture::new("Beta")))
            .remote(PackageFixture::new("Remote"));
        let (_tmp, root) = fixture.write();
        let project = fixture.load(&root);
        let lock = root.join(".build/packages.lock");

        resolve_project(&project, &[DependencyCategory::packages()]).unwrap();
        let first = std::fs::read(&lock).unwrap();
        resolve_project(&project, &[DependencyCategory::packages()]).unwrap();
        let second = std::fs::read(&lock).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_resolution_keeps_previous_lock() {
        let fixture = ProjectFixture::new("blink").vendor(PackageFixture::new("Alpha"));
        let (_tmp, root) = fixture.write();
        let project = fixture.load(&root);
        resolve_project(&project, &[DependencyCategory::packages()]).unwrap();

        std::fs::create_dir_all(root.join("lib/remote/Alpha")).unwrap();
        let err = resolve_project(&project, &[DependencyCategory::packages()]).unwrap_err();
        assert!(err.chain().any(|e| matches!(
            e.downcast_ref::<ResolveError>(),
            Some(ResolveError::IdentityCollision { .. })
        )));

        let record = load_lockfile(&root.join(".build/packages.lock")).unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_extra_category() {
        let fixture = ProjectFixture::new("blink")
            .vendor(PackageFixture::new("Alpha"))
            .file("lib/local/Gamma/src/gamma.cpp", "");
        let (_tmp, root) = fixture.write();
        let project = fixture.load(&root);

        let libraries = DependencyCategory {
            name: "libraries".to_string(),
            roots: vec![PathBuf::from("lib/local")],
            nested_dir: PathBuf::from("lib"),
        };
        let resolved =
            resolve_project(&project, &[DependencyCategory::packages(), libraries]).unwrap();

        assert_eq!(resolved[1].forest.roots[0].name, "Gamma");
        assert!(root.join(".build/libraries.lock").exists());
    }
}
