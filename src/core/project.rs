//! Project - the root package being built and its output layout.
//!
//! All generated state lives under `<root>/.build`:
//!
//! ```text
//! .build/
//!   config.toml                      project tool configuration
//!   <category>.lock                  one lock file per dependency category
//!   targets/<target>/
//!     CMakeLists.txt                 root descriptor
//!     build-order.txt                artifact directories, children first
//!     build/                         root build directory
//!     <category>/<identity>/         per-package descriptor + archive
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::category::DependencyCategory;
use crate::core::identity::Identity;
use crate::core::manifest::{Manifest, ManifestError, MANIFEST_NAME};
use crate::core::target::{ProjectKind, Target};

/// Name of the generated-state directory.
pub const BUILD_DIR_NAME: &str = ".build";

/// Name of the build-order file inside a target directory.
pub const BUILD_ORDER_FILE: &str = "build-order.txt";

/// Name of every generated descriptor.
pub const DESCRIPTOR_FILE: &str = "CMakeLists.txt";

/// The project being built.
#[derive(Debug, Clone)]
pub struct Project {
    manifest: Manifest,
    root: PathBuf,
    name: String,
}

impl Project {
    /// Load a project from its manifest path.
    pub fn load(manifest_path: &Path) -> Result<Self, ManifestError> {
        let manifest = Manifest::load(manifest_path)?;
        let root = manifest_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Ok(Self::from_manifest(manifest, root))
    }

    /// Build a project from an already-parsed manifest.
    pub fn from_manifest(manifest: Manifest, root: PathBuf) -> Self {
        let name = manifest
            .name()
            .map(str::to_string)
            .or_else(|| {
                root.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "unnamed".to_string());

        Project {
            manifest,
            root,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn kind(&self) -> ProjectKind {
        self.manifest.project.kind
    }

    pub fn platform(&self) -> &str {
        &self.manifest.project.platform
    }

    pub fn framework(&self) -> &str {
        &self.manifest.project.framework
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_NAME)
    }

    /// The `.build` directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR_NAME)
    }

    /// Project-local tool configuration.
    pub fn config_path(&self) -> PathBuf {
        self.build_dir().join("config.toml")
    }

    pub fn lockfile_path(&self, category: &DependencyCategory) -> PathBuf {
        self.build_dir().join(category.lockfile_name())
    }

    pub fn targets_dir(&self) -> PathBuf {
        self.build_dir().join("targets")
    }

    /// Directory holding everything generated for one target.
    pub fn target_dir(&self, target: &str) -> PathBuf {
        self.targets_dir().join(target)
    }

    pub fn build_order_path(&self, target: &str) -> PathBuf {
        self.target_dir(target).join(BUILD_ORDER_FILE)
    }

    /// Directory the root descriptor is configured and built in.
    pub fn root_build_dir(&self, target: &str) -> PathBuf {
        self.target_dir(target).join("build")
    }

    /// Absolute root paths of a dependency category.
    pub fn category_roots(&self, category: &DependencyCategory) -> Vec<PathBuf> {
        category.roots.iter().map(|r| self.root.join(r)).collect()
    }

    /// Resolve a target name (or the `default` alias).
    pub fn select_target(&self, name: &str) -> Result<&Target> {
        if self.manifest.targets.is_empty() {
            bail!(
                "project `{}` declares no targets\n\
                 help: add a `[targets.<name>]` table with a `board` to {}",
                self.name,
                MANIFEST_NAME
            );
        }

        match self.manifest.select_target(name) {
            Some(target) => Ok(target),
            None => bail!(
                "target `{}` not found in project `{}`\n\
                 help: available targets: {}",
                name,
                self.name,
                self.manifest
                    .targets
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.manifest.targets
    }
}

/// Artifact directory of one package for one target.
///
/// Free function so emitters can compute paths of packages they only know
/// from a lock file.
pub fn artifact_dir(
    targets_dir: &Path,
    target: &str,
    category: &str,
    identity: &Identity,
) -> PathBuf {
    targets_dir
        .join(target)
        .join(category)
        .join(identity.as_str())
}

/// Find `wio.toml` in `dir`.
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let path = dir.join(MANIFEST_NAME);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        })
    }
}
