//! Configuration file support for wio.
//!
//! wio reads two configuration files:
//! - Global: `~/.wio/config.toml` - User-wide defaults
//! - Project: `.build/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::DependencyCategory;

/// Environment variable naming the toolchain root.
pub const TOOLCHAIN_ROOT_ENV: &str = "WIO_TOOLCHAIN_ROOT";

/// Generator passed to `cmake -G` unless configured otherwise.
pub const DEFAULT_GENERATOR: &str = "Unix Makefiles";

/// wio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Dependency categories; the built-in `packages` category when empty
    #[serde(rename = "category", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<DependencyCategory>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory containing `toolchain/cmake/`
    pub toolchain_root: Option<PathBuf>,

    /// CMake generator
    pub generator: Option<String>,

    /// Make program run after each configure step
    pub make: Option<String>,

    /// Parallel jobs passed to make (`-j`)
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.toolchain_root.is_some() {
            self.build.toolchain_root = other.build.toolchain_root;
        }
        if other.build.generator.is_some() {
            self.build.generator = other.build.generator;
        }
        if other.build.make.is_some() {
            self.build.make = other.build.make;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }

        // Category lists replace each other wholesale.
        if !other.categories.is_empty() {
            self.categories = other.categories;
        }
    }

    /// The dependency categories to resolve, validated.
    pub fn categories(&self) -> Result<Vec<DependencyCategory>> {
        if self.categories.is_empty() {
            return Ok(vec![DependencyCategory::packages()]);
        }

        let mut seen = BTreeSet::new();
        for category in &self.categories {
            if let Err(message) = category.validate() {
                bail!("invalid dependency category: {}", message);
            }
            if !seen.insert(category.name.as_str()) {
                bail!("dependency category `{}` is declared twice", category.name);
            }
        }

        Ok(self.categories.clone())
    }

    pub fn generator(&self) -> &str {
        self.build.generator.as_deref().unwrap_or(DEFAULT_GENERATOR)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.build/config.toml)
/// 2. Global config (~/.wio/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    // A file that fails to parse is an error, never skipped.
    for path in global_path.into_iter().chain([project_path]) {
        if path.exists() {
            config.merge(Config::load(path)?);
            tracing::debug!("loaded config from {}", path.display());
        }
    }

    Ok(config)
}

/// Get the global wio directory (~/.wio).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".wio"))
}

/// Get the global config path (~/.wio/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Pick the toolchain root.
///
/// An explicit root (flag or `WIO_TOOLCHAIN_ROOT`) wins over the config,
/// which wins over the directory of the running executable.
pub fn resolve_toolchain_root(explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    if let Some(root) = &config.build.toolchain_root {
        return Ok(root.clone());
    }

    let exe = std::env::current_exe().context("failed to locate the wio executable")?;
    match exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => bail!(
            "cannot determine the toolchain root from {}\n\
             help: pass `--toolchain-root` or set {}",
            exe.display(),
            TOOLCHAIN_ROOT_ENV
        ),
    }
}
