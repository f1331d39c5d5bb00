//! Package identities.
//!
//! An identity encodes a package's ancestry: a top-level package is keyed by
//! its bare name, a nested package by `parent__name`. Identities key the lock
//! file and name every build artifact, so they must be unique per resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved separator between ancestry segments.
pub const IDENTITY_SEPARATOR: &str = "__";

/// Ancestry-encoded package identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Identity of a top-level package.
    pub fn root(name: &str) -> Self {
        Identity(name.to_string())
    }

    /// Identity of a package nested directly under `self`.
    pub fn child(&self, name: &str) -> Self {
        Identity(format!("{}{}{}", self.0, IDENTITY_SEPARATOR, name))
    }

    /// Derive an identity from an optional parent.
    pub fn derive(parent: Option<&Identity>, name: &str) -> Self {
        match parent {
            Some(parent) => parent.child(name),
            None => Identity::root(name),
        }
    }

    /// Wrap an identity read back from a lock file.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Identity(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for packages resolved directly under a category root.
    pub fn is_top_level(&self) -> bool {
        !self.0.contains(IDENTITY_SEPARATOR)
    }

    /// Nesting depth, 0 for top-level packages.
    pub fn depth(&self) -> usize {
        self.0.matches(IDENTITY_SEPARATOR).count()
    }

    /// The package's own name (last ancestry segment).
    pub fn leaf_name(&self) -> &str {
        self.0
            .rsplit(IDENTITY_SEPARATOR)
            .next()
            .unwrap_or(self.0.as_str())
    }

    /// File name of the static library built for this package.
    pub fn archive_name(&self) -> String {
        format!("lib{}.a", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `name` when `parent` is empty, otherwise `parent__name`.
pub fn derive_identity(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{IDENTITY_SEPARATOR}{name}")
    }
}

/// Check that a package name can be used as an identity segment.
pub fn validate_package_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("package name cannot be empty".to_string());
    }

    if name.contains(IDENTITY_SEPARATOR) {
        return Err(format!(
            "package name cannot contain the reserved separator `{}`",
            IDENTITY_SEPARATOR
        ));
    }

    if name.starts_with('.') {
        return Err("package name cannot start with a dot".to_string());
    }

    if name.contains(['/', '\\']) {
        return Err("package name cannot contain a path separator".to_string());
    }

    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("package name cannot contain whitespace".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_identity() {
        assert_eq!(derive_identity("", "Alpha"), "Alpha");
        assert_eq!(derive_identity("Alpha", "Beta"), "Alpha__Beta");
        assert_eq!(derive_identity("Alpha__Beta", "Gamma"), "Alpha__Beta__Gamma");
    }

    #[test]
    fn test_identity_child_matches_derive() {
        let alpha = Identity::root("Alpha");
        let beta = alpha.child("Beta");
        assert_eq!(beta.as_str(), derive_identity("Alpha", "Beta"));
        assert_eq!(Identity::derive(Some(&alpha), "Beta"), beta);
        assert_eq!(Identity::derive(None, "Alpha"), alpha);
    }

    #[test]
    fn test_identity_depth() {
        let gamma = Identity::root("Alpha").child("Beta").child("Gamma");
        assert!(Identity::root("Alpha").is_top_level());
        assert!(!gamma.is_top_level());
        assert_eq!(gamma.depth(), 2);
        assert_eq!(gamma.leaf_name(), "Gamma");
    }

    #[test]
    fn test_archive_name() {
        let id = Identity::root("Alpha").child("Beta");
        assert_eq!(id.archive_name(), "libAlpha__Beta.a");
    }

    #[test]
    fn test_validate_package_name() {
        assert!(validate_package_name("Alpha").is_ok());
        assert!(validate_package_name("my_lib-2").is_ok());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name(".hidden").is_err());
        assert!(validate_package_name("a/b").is_err());
        assert!(validate_package_name("two words").is_err());

        let err = validate_package_name("Alpha__Beta").unwrap_err();
        assert!(err.contains("reserved separator"));
    }
}
