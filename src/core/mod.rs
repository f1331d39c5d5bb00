//! Core data structures for wio.
//!
//! This module contains the foundational types used throughout wio:
//! - Package identities and compile flag sets
//! - Resolved package nodes
//! - Manifests, targets and dependency categories
//! - The project and its output layout

pub mod category;
pub mod flags;
pub mod identity;
pub mod manifest;
pub mod package;
pub mod project;
pub mod target;

pub use category::DependencyCategory;
pub use flags::CompileFlags;
pub use identity::{derive_identity, validate_package_name, Identity, IDENTITY_SEPARATOR};
pub use manifest::{DependencySpec, Manifest, ManifestError, MANIFEST_NAME};
pub use package::PackageNode;
pub use project::{artifact_dir, find_manifest, Project};
pub use target::{validate_target_name, ProjectKind, Target};
