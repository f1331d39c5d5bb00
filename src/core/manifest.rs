//! wio.toml manifest parsing and schema.
//!
//! The same file format serves both the project being built and every
//! package vendored under it. Packages usually only declare a name, their
//! compile flags and overrides for their own nested dependencies; the
//! project additionally declares its kind and targets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::flags::CompileFlags;
use crate::core::target::{
    validate_target_name, ProjectKind, Target, TargetSpec, DEFAULT_TARGET_ALIAS,
};

/// Manifest file name.
pub const MANIFEST_NAME: &str = "wio.toml";

/// Errors loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `wio.toml` in {} or any parent directory", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read manifest: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid manifest {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// The `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Declared name; packages without one are named after their directory
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub kind: ProjectKind,

    #[serde(default = "default_platform")]
    pub platform: String,

    #[serde(default = "default_framework")]
    pub framework: String,

    /// Package flags; for `pkg` projects also the library flags of the
    /// validation build
    #[serde(default)]
    pub compile_flags: CompileFlags,
}

fn default_platform() -> String {
    "avr".to_string()
}

fn default_framework() -> String {
    "cosa".to_string()
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        ProjectMetadata {
            name: None,
            kind: ProjectKind::default(),
            platform: default_platform(),
            framework: default_framework(),
            compile_flags: CompileFlags::new(),
        }
    }
}

/// An entry of the `[dependencies]` table.
///
/// Other keys (such as where a remote package was fetched from) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencySpec {
    #[serde(default)]
    pub compile_flags: CompileFlags,
}

/// Raw manifest as deserialized from TOML.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    project: ProjectMetadata,

    #[serde(default)]
    dependencies: BTreeMap<String, DependencySpec>,

    #[serde(default)]
    targets: BTreeMap<String, TargetSpec>,
}

/// A parsed wio.toml.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub project: ProjectMetadata,

    /// Flag overrides for this manifest's direct dependencies
    pub dependencies: BTreeMap<String, DependencySpec>,

    /// Targets sorted by name
    pub targets: Vec<Target>,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string().trim_end().to_string(),
        })?;

        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let targets = Self::convert_targets(raw.targets, path)?;

        Ok(Manifest {
            project: raw.project,
            dependencies: raw.dependencies,
            targets,
            manifest_dir,
        })
    }

    fn convert_targets(
        raw: BTreeMap<String, TargetSpec>,
        path: &Path,
    ) -> Result<Vec<Target>, ManifestError> {
        let flagged: Vec<String> = raw
            .iter()
            .filter(|(_, spec)| spec.default)
            .map(|(name, _)| name.clone())
            .collect();

        if flagged.len() > 1 {
            return Err(ManifestError::Invalid {
                path: path.to_path_buf(),
                message: format!(
                    "only one target can be the default, found {}",
                    flagged
                        .iter()
                        .map(|n| format!("`{}`", n))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }

        let mut targets = Vec::with_capacity(raw.len());
        for (name, spec) in raw {
            if name == DEFAULT_TARGET_ALIAS {
                return Err(ManifestError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("`{}` is reserved and cannot name a target", name),
                });
            }
            if let Err(reason) = validate_target_name(&name) {
                return Err(ManifestError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("invalid target name `{}`: {}", name, reason),
                });
            }
            if spec.board.is_empty() {
                return Err(ManifestError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("target `{}` has no board", name),
                });
            }

            targets.push(Target {
                name,
                board: spec.board,
                compile_flags: spec.compile_flags,
                is_default: spec.default,
            });
        }

        // With no explicit default the first target (by name) is the default.
        if flagged.is_empty() {
            if let Some(first) = targets.first_mut() {
                first.is_default = true;
            }
        }

        Ok(targets)
    }

    /// Declared name, if any and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.project.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Flag overrides keyed by dependency name.
    pub fn dependency_overrides(&self) -> BTreeMap<String, CompileFlags> {
        self.dependencies
            .iter()
            .filter(|(_, spec)| !spec.compile_flags.is_empty())
            .map(|(name, spec)| (name.clone(), spec.compile_flags.clone()))
            .collect()
    }

    pub fn default_target(&self) -> Option<&Target> {
        self.targets.iter().find(|t| t.is_default)
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Look up a target, resolving the `default` alias.
    pub fn select_target(&self, name: &str) -> Option<&Target> {
        if name == DEFAULT_TARGET_ALIAS {
            self.default_target()
        } else {
            self.target(name)
        }
    }
}
