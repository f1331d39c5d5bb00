//! Root descriptor emission.
//!
//! The root descriptor builds the target's final artifact from the
//! project's own sources. Only top-level packages expose headers to those
//! sources, but every locked package is linked because the final link is
//! flat.

use std::path::PathBuf;

use tracing::debug;

use crate::builder::descriptor::{RootArtifact, RootDescriptor};
use crate::builder::emit::{write_descriptor, EmitContext, EmitError};
use crate::core::package::{include_dir, source_dir};
use crate::core::{CompileFlags, ProjectKind};
use crate::resolver::LockRecord;

/// Lock record of one dependency category.
#[derive(Debug, Clone)]
pub struct CategoryLock {
    pub category: String,
    pub record: LockRecord,
}

/// Inputs of the root descriptor for one target.
#[derive(Debug, Clone)]
pub struct RootInputs<'a> {
    pub ctx: &'a EmitContext,
    pub project_name: &'a str,
    pub kind: ProjectKind,
    pub target_flags: &'a CompileFlags,
    /// Appended after the target flags for `pkg` projects only
    pub library_flags: &'a CompileFlags,
    pub locks: &'a [CategoryLock],
}

/// Assemble the root descriptor record.
pub fn describe_root(inputs: &RootInputs<'_>) -> RootDescriptor {
    let ctx = inputs.ctx;
    let root = &ctx.project_root;

    let mut flags = inputs.target_flags.clone();
    let artifact = match inputs.kind {
        ProjectKind::App => RootArtifact::Firmware,
        ProjectKind::Pkg => {
            flags.merge(inputs.library_flags);
            RootArtifact::PackageTest {
                tests_dir: root.join("tests"),
            }
        }
    };

    let mut definitions = vec![ctx.platform_macro()];
    definitions.extend(flags.iter().map(str::to_string));

    let mut include_dirs = vec![include_dir(root)];
    let mut archives: Vec<PathBuf> = Vec::new();

    for lock in inputs.locks {
        include_dirs.extend(lock.record.top_level().map(|p| include_dir(&p.path)));
        archives.extend(lock.record.iter().map(|p| {
            ctx.artifact_dir(&lock.category, &p.hash)
                .join(p.hash.archive_name())
        }));
    }

    RootDescriptor {
        project_name: inputs.project_name.to_string(),
        target_name: ctx.target.clone(),
        artifact,
        toolchain_file: ctx.toolchain_file(),
        source_dir: source_dir(root),
        board: ctx.board.clone(),
        definitions,
        include_dirs,
        archives,
    }
}

/// Write `.build/targets/<target>/CMakeLists.txt`.
pub fn emit_root(inputs: &RootInputs<'_>) -> Result<PathBuf, EmitError> {
    let descriptor = describe_root(inputs);
    let path = write_descriptor(&inputs.ctx.target_dir(), &descriptor.render())?;
    debug!(
        "wrote root descriptor {} ({} archives)",
        path.display(),
        descriptor.archives.len()
    );
    Ok(path)
}
