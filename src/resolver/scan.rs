//! Package scanner.
//!
//! Reads what a single package directory says about itself. Never looks at
//! nested packages; the graph builder owns recursion.

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::identity::validate_package_name;
use crate::core::manifest::{Manifest, ManifestError, MANIFEST_NAME};
use crate::core::CompileFlags;
use crate::resolver::errors::ResolveError;

/// What a package directory declares.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedPackage {
    pub name: String,
    pub compile_flags: CompileFlags,
    /// Flag overrides this package declares for its own direct dependencies
    pub dependency_overrides: BTreeMap<String, CompileFlags>,
    pub has_manifest: bool,
}

/// Scan one package directory.
///
/// Without a `wio.toml` the package is named after its directory and has no
/// flags.
pub fn scan_package(dir: &Path) -> Result<ScannedPackage, ResolveError> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let manifest_path = dir.join(MANIFEST_NAME);
    let scanned = if manifest_path.is_file() {
        let manifest = Manifest::load(&manifest_path).map_err(|e| match e {
            ManifestError::Read { path, source } => ResolveError::filesystem(path, source),
            other => ResolveError::ManifestParse {
                path: manifest_path.clone(),
                message: other.to_string(),
            },
        })?;

        ScannedPackage {
            name: manifest.name().map(str::to_string).unwrap_or(dir_name),
            compile_flags: manifest.project.compile_flags.clone(),
            dependency_overrides: manifest.dependency_overrides(),
            has_manifest: true,
        }
    } else {
        ScannedPackage {
            name: dir_name,
            compile_flags: CompileFlags::new(),
            dependency_overrides: BTreeMap::new(),
            has_manifest: false,
        }
    };

    validate_package_name(&scanned.name).map_err(|reason| ResolveError::InvalidPackageName {
        name: scanned.name.clone(),
        path: dir.to_path_buf(),
        reason,
    })?;

    Ok(scanned)
}
