//! Dependency graph builder.
//!
//! Walks the root directories of one dependency category and assembles the
//! forest of package nodes. Every recursive call builds and returns its own
//! subtree; nothing is shared between calls.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::category::PACKAGES_CATEGORY;
use crate::core::{CompileFlags, DependencyCategory, Identity, PackageNode};
use crate::resolver::errors::ResolveError;
use crate::resolver::forest::DependencyForest;
use crate::resolver::scan::scan_package;
use crate::util::fs::list_package_dirs;

/// Flag overrides keyed by dependency name.
pub type FlagOverrides = BTreeMap<String, CompileFlags>;

/// Builds a [`DependencyForest`] from a set of root directories.
#[derive(Debug, Clone)]
pub struct DependencyGraphBuilder {
    category: String,
    roots: Vec<PathBuf>,
    nested_dir: PathBuf,
}

impl DependencyGraphBuilder {
    /// Create a builder over absolute root directories.
    ///
    /// `nested_dir` is the package-relative directory holding a package's
    /// own vendored dependencies.
    pub fn new(roots: Vec<PathBuf>, nested_dir: impl Into<PathBuf>) -> Self {
        DependencyGraphBuilder {
            category: PACKAGES_CATEGORY.to_string(),
            roots,
            nested_dir: nested_dir.into(),
        }
    }

    /// Create a builder for a category of the project rooted at `project_root`.
    pub fn for_category(project_root: &Path, category: &DependencyCategory) -> Self {
        DependencyGraphBuilder {
            category: category.name.clone(),
            roots: category.roots.iter().map(|r| project_root.join(r)).collect(),
            nested_dir: category.nested_dir.clone(),
        }
    }

    /// Resolve the forest.
    ///
    /// `overrides` are the flag overrides declared by the project for its
    /// direct dependencies, i.e. the top-level packages.
    pub fn build(&self, overrides: &FlagOverrides) -> Result<DependencyForest, ResolveError> {
        let mut roots = Vec::new();

        for root in &self.roots {
            if !root.is_dir() {
                debug!("skipping missing root {}", root.display());
                continue;
            }

            for dir in list_package_dirs(root).map_err(|e| ResolveError::filesystem(root, e))? {
                roots.push(self.resolve_package(&dir, None, overrides)?);
            }
        }

        check_siblings(&roots)?;

        Ok(DependencyForest::new(self.category.clone(), roots))
    }

    fn resolve_package(
        &self,
        dir: &Path,
        parent: Option<&Identity>,
        overrides: &FlagOverrides,
    ) -> Result<PackageNode, ResolveError> {
        let scanned = scan_package(dir)?;
        let identity = Identity::derive(parent, &scanned.name);
        debug!("resolved {} at {}", identity, dir.display());

        let mut node = PackageNode::new(scanned.name.clone(), identity, dir.to_path_buf())
            .with_flags(scanned.compile_flags);

        let nested = dir.join(&self.nested_dir);
        if nested.is_dir() {
            let child_dirs =
                list_package_dirs(&nested).map_err(|e| ResolveError::filesystem(&nested, e))?;

            for child_dir in child_dirs {
                // Children only see the overrides of their immediate parent.
                let child = self.resolve_package(
                    &child_dir,
                    Some(&node.identity),
                    &scanned.dependency_overrides,
                )?;
                node.children.push(child);
            }

            check_siblings(&node.children)?;
        }

        if let Some(extra) = overrides.get(&scanned.name) {
            node.compile_flags.merge(extra);
        }

        Ok(node)
    }
}

/// Reject siblings that resolved to the same identity.
fn check_siblings(nodes: &[PackageNode]) -> Result<(), ResolveError> {
    let mut seen: BTreeMap<&Identity, &Path> = BTreeMap::new();

    for node in nodes {
        if let Some(first) = seen.insert(&node.identity, &node.path) {
            return Err(ResolveError::IdentityCollision {
                identity: node.identity.to_string(),
                first: first.to_path_buf(),
                second: node.path.clone(),
            });
        }
    }

    Ok(())
}
