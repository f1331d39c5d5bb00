//! Global context for wio operations.
//!
//! Provides centralized access to the working directory, the user's wio
//! home and configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{find_manifest, ManifestError, Project};
use crate::util::config::{load_config, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global wio data (~/.wio/)
    home: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            home: crate::util::config::global_config_dir(),
        })
    }

    /// Create a GlobalContext with a specific working directory.
    ///
    /// Relative paths are taken relative to the process working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = if cwd.is_absolute() {
            cwd
        } else {
            ctx.cwd.join(cwd)
        };
        Ok(ctx)
    }

    /// Override the wio home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = Some(home);
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|h| h.join("config.toml"))
    }

    /// Find `wio.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        let mut current = self.cwd.clone();
        loop {
            match find_manifest(&current) {
                Ok(path) => return Ok(path),
                Err(ManifestError::NotFound { .. }) => {
                    if !current.pop() {
                        return Err(ManifestError::NotFound {
                            dir: self.cwd.clone(),
                        });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Load the project enclosing the working directory.
    pub fn load_project(&self) -> Result<Project> {
        let manifest_path = self.find_manifest()?;
        let project = Project::load(&manifest_path)?;
        tracing::debug!("project `{}` at {}", project.name(), project.root().display());
        Ok(project)
    }

    /// Merged global and project configuration.
    pub fn load_config(&self, project: &Project) -> Result<Config> {
        load_config(self.config_path().as_deref(), &project.config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path) -> PathBuf {
        let manifest = dir.join("wio.toml");
        std::fs::write(
            &manifest,
            "[project]\nname = \"blink\"\n\n[targets.main]\nboard = \"uno\"\n",
        )
        .unwrap();
        manifest
    }

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
    }

    #[test]
    fn test_find_manifest_walks_upward() {
        let tmp = TempDir::new().unwrap();
        let manifest = write_manifest(tmp.path());
        let nested = tmp.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_find_manifest_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        assert!(matches!(
            ctx.find_manifest(),
            Err(ManifestError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_config_from_project() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path());
        std::fs::create_dir(tmp.path().join(".build")).unwrap();
        std::fs::write(
            tmp.path().join(".build/config.toml"),
            "[build]\ntoolchain_root = \"/opt/wio\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));
        let project = ctx.load_project().unwrap();
        let config = ctx.load_config(&project).unwrap();

        assert_eq!(project.name(), "blink");
        assert_eq!(config.build.toolchain_root, Some(PathBuf::from("/opt/wio")));
    }

    #[test]
    fn test_broken_global_config_is_error() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path());
        let home = tmp.path().join("home");
        std::fs::create_dir(&home).unwrap();
        std::fs::write(home.join("config.toml"), "[[category]]\nname = \"x\"\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(home);
        let project = ctx.load_project().unwrap();
        assert!(ctx.load_config(&project).is_err());
    }
}
