//! High-level operations.
//!
//! This module contains the implementation of wio commands.

pub mod build;
pub mod clean;
pub mod generate;
pub mod lockfile;
pub mod resolve;

pub use build::{build, BuildOptions, BuildPlan, BuildStep};
pub use clean::clean;
pub use generate::{
    generate, generate_target, GenerateOptions, GenerateReport, GeneratedTarget, TargetSelection,
};
pub use lockfile::{load_lockfile, save_lockfile};
pub use resolve::{resolve_category, resolve_project, ResolvedCategory};
