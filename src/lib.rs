//! wio - dependency resolution and build descriptor generation for AVR
//! projects.
//!
//! This crate provides the library behind the `wio` binary: discovering
//! vendored and fetched packages, locking them, and writing the CMake
//! descriptors that build each package and the firmware that links them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for wio unit tests.
///
/// Only available when compiling tests. Builds throwaway project trees on
/// disk.
#[cfg(test)]
pub(crate) mod test_support;

pub use core::{CompileFlags, DependencyCategory, Identity, Manifest, PackageNode, Project, Target};
pub use resolver::{DependencyForest, LockRecord, ResolveError};
pub use util::context::GlobalContext;
