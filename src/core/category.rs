//! Dependency categories.
//!
//! A category names a set of directories that hold top-level packages and
//! the directory, inside each package, that holds its nested packages. All
//! categories are resolved by the same graph builder; each one gets its own
//! lock file and its own artifact subtree per target.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the built-in category.
pub const PACKAGES_CATEGORY: &str = "packages";

/// Layout of one dependency category, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCategory {
    /// Category name, used for the lock file and artifact directory
    pub name: String,

    /// Root directories scanned for top-level packages, in order
    pub roots: Vec<PathBuf>,

    /// Directory inside a package holding its nested packages
    #[serde(default = "default_nested_dir")]
    pub nested_dir: PathBuf,
}

fn default_nested_dir() -> PathBuf {
    PathBuf::from("lib")
}

impl DependencyCategory {
    /// Vendored packages (`lib/vendor`) followed by fetched ones (`lib/remote`).
    pub fn packages() -> Self {
        DependencyCategory {
            name: PACKAGES_CATEGORY.to_string(),
            roots: vec![PathBuf::from("lib/vendor"), PathBuf::from("lib/remote")],
            nested_dir: default_nested_dir(),
        }
    }

    /// Lock file name for this category.
    pub fn lockfile_name(&self) -> String {
        format!("{}.lock", self.name)
    }

    /// Reject names that cannot be used as a path component.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("category name cannot be empty".to_string());
        }
        if self.name.starts_with('.') || self.name.contains(['/', '\\']) {
            return Err(format!("invalid category name `{}`", self.name));
        }
        if self.roots.is_empty() {
            return Err(format!("category `{}` has no roots", self.name));
        }
        Ok(())
    }
}

impl Default for DependencyCategory {
    fn default() -> Self {
        Self::packages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packages_category() {
        let category = DependencyCategory::packages();
        assert_eq!(category.lockfile_name(), "packages.lock");
        assert_eq!(category.roots[0], PathBuf::from("lib/vendor"));
        assert_eq!(category.roots[1], PathBuf::from("lib/remote"));
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_category_from_toml_defaults_nested_dir() {
        let category: DependencyCategory = toml::from_str(
            r#"
name = "libraries"
roots = ["lib/local"]
"#,
        )
        .unwrap();

        assert_eq!(category.nested_dir, PathBuf::from("lib"));
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_category_validation() {
        let mut category = DependencyCategory::packages();
        category.name = "../escape".to_string();
        assert!(category.validate().is_err());

        let mut category = DependencyCategory::packages();
        category.roots.clear();
        assert!(category.validate().is_err());
    }
}
