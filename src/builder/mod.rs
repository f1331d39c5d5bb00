//! Build descriptor generation.
//!
//! Turns resolved forests and lock records into CMake descriptors:
//! - `descriptor`: typed descriptor records and the CMake writer
//! - `emit`: one descriptor per package, children first
//! - `root`: the per-target descriptor linking everything
//! - `build_order`: the ordered list of artifact directories

pub mod build_order;
pub mod descriptor;
pub mod emit;
pub mod root;

pub use build_order::BuildOrder;
pub use descriptor::{CMakeWriter, PackageDescriptor, RootArtifact, RootDescriptor};
pub use emit::{DescriptorEmitter, EmitContext, EmitError};
pub use root::{describe_root, emit_root, CategoryLock, RootInputs};
