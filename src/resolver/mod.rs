//! Dependency resolution.
//!
//! Resolution is a pure walk of the filesystem: every vendored or fetched
//! package is discovered from the directory layout, given an identity from
//! its ancestry, and flattened into a lock record. Nothing is downloaded and
//! no versions are solved.

pub mod encode;
pub mod errors;
pub mod forest;
pub mod graph;
pub mod scan;

pub use encode::{LockRecord, LockedPackage, LOCK_VERSION};
pub use errors::ResolveError;
pub use forest::DependencyForest;
pub use graph::{DependencyGraphBuilder, FlagOverrides};
pub use scan::{scan_package, ScannedPackage};
