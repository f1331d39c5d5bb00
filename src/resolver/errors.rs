//! Resolution error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error during dependency resolution.
///
/// Every variant aborts the whole resolution run; no partial forest is
/// ever returned.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to parse manifest of package at {}", .path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("failed to read {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("identity `{identity}` is claimed by two packages")]
    IdentityCollision {
        identity: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid package name `{name}`: {reason}")]
    InvalidPackageName {
        name: String,
        path: PathBuf,
        reason: String,
    },
}

impl ResolveError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResolveError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::ManifestParse { path, message } => {
                Diagnostic::error("malformed package manifest")
                    .with_location(path)
                    .with_context(message.clone())
                    .with_suggestion("Fix the TOML syntax of the manifest")
                    .with_suggestion(
                        "Delete the manifest to fall back to the directory name and no flags",
                    )
            }

            ResolveError::Filesystem { path, source } => {
                Diagnostic::error(format!("cannot read `{}`", path.display()))
                    .with_context(source.to_string())
                    .with_suggestion("Check the directory exists and is readable")
            }

            ResolveError::IdentityCollision {
                identity,
                first,
                second,
            } => Diagnostic::error(format!(
                "two packages resolve to the same identity `{}`",
                identity
            ))
            .with_context(format!("first:  {}", first.display()))
            .with_context(format!("second: {}", second.display()))
            .with_suggestion("Remove one of the copies")
            .with_suggestion("Give one package a different `name` in its wio.toml"),

            ResolveError::InvalidPackageName { name, path, reason } => {
                Diagnostic::error(format!("invalid package name `{}`", name))
                    .with_location(path)
                    .with_context(reason.clone())
                    .with_suggestion("Rename the package directory or set `name` in its wio.toml")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_diagnostic() {
        let err = ResolveError::IdentityCollision {
            identity: "Alpha".to_string(),
            first: PathBuf::from("/p/lib/vendor/Alpha"),
            second: PathBuf::from("/p/lib/remote/Alpha"),
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: two packages resolve to the same identity `Alpha`"));
        assert!(output.contains("/p/lib/vendor/Alpha"));
        assert!(output.contains("/p/lib/remote/Alpha"));
        assert!(output.contains("= help: Remove one of the copies"));
    }

    #[test]
    fn test_error_display() {
        let err = ResolveError::InvalidPackageName {
            name: "a__b".to_string(),
            path: PathBuf::from("/p/lib/vendor/a__b"),
            reason: "reserved separator".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid package name `a__b`: reserved separator"
        );
    }
}
