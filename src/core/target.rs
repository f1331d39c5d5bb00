//! Build targets - named board/flag configurations.
//!
//! Every target gets its own descriptor tree under `.build/targets/<name>`,
//! so the same sources can be built for several boards side by side.

use serde::{Deserialize, Serialize};

use crate::core::flags::CompileFlags;

/// Name that selects the project's default target on the command line.
pub const DEFAULT_TARGET_ALIAS: &str = "default";

/// A named build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Target name (also the firmware name)
    pub name: String,

    /// Board identifier passed to the toolchain (e.g. `uno`, `mega2560`)
    pub board: String,

    /// Flags applied to the project's own sources
    pub compile_flags: CompileFlags,

    /// Whether this is the project's default target
    pub is_default: bool,
}

impl Target {
    pub fn new(name: impl Into<String>, board: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            board: board.into(),
            compile_flags: CompileFlags::new(),
            is_default: false,
        }
    }

    pub fn with_flags(mut self, flags: CompileFlags) -> Self {
        self.compile_flags = flags;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Check that a target name can be used as a directory and CMake target name.
pub fn validate_target_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("target name cannot be empty".to_string());
    }
    if name.starts_with('.') {
        return Err("target name cannot start with a dot".to_string());
    }
    if name.contains(['/', '\\']) {
        return Err("target name cannot contain a path separator".to_string());
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("target name cannot contain whitespace".to_string());
    }
    Ok(())
}

/// A target as written in `wio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSpec {
    pub board: String,

    #[serde(default)]
    pub compile_flags: CompileFlags,

    #[serde(default)]
    pub default: bool,
}

/// The kind of project being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Firmware application
    #[default]
    #[serde(alias = "application")]
    App,

    /// Reusable package, built as a validation firmware from `tests/`
    #[serde(alias = "package", alias = "lib")]
    Pkg,
}

impl ProjectKind {
    pub fn is_package(&self) -> bool {
        matches!(self, ProjectKind::Pkg)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::App => "app",
            ProjectKind::Pkg => "pkg",
        }
    }
}
