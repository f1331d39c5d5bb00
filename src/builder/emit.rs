//! Per-package descriptor emission.
//!
//! Packages are emitted children first. A parent's descriptor names the
//! archive of each direct child by path, and the returned [`BuildOrder`]
//! carries the sequencing to the build driver.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::builder::build_order::BuildOrder;
use crate::builder::descriptor::{
    platform_macro, toolchain_file, LinkedDependency, PackageDescriptor,
};
use crate::core::project::{BUILD_DIR_NAME, DESCRIPTOR_FILE};
use crate::core::{artifact_dir, Identity, PackageNode};
use crate::resolver::DependencyForest;

/// Error writing generated files.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write build descriptor {}", .path.display())]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything descriptor emission needs to know about one target.
#[derive(Debug, Clone)]
pub struct EmitContext {
    pub project_root: PathBuf,
    pub target: String,
    pub board: String,
    pub platform: String,
    pub framework: String,
    /// Directory containing `toolchain/cmake/`
    pub toolchain_root: PathBuf,
}

impl EmitContext {
    pub fn targets_dir(&self) -> PathBuf {
        self.project_root.join(BUILD_DIR_NAME).join("targets")
    }

    pub fn target_dir(&self) -> PathBuf {
        self.targets_dir().join(&self.target)
    }

    /// Artifact directory of a package for this target.
    pub fn artifact_dir(&self, category: &str, identity: &Identity) -> PathBuf {
        artifact_dir(&self.targets_dir(), &self.target, category, identity)
    }

    pub fn toolchain_file(&self) -> PathBuf {
        toolchain_file(&self.toolchain_root, &self.framework)
    }

    pub fn platform_macro(&self) -> String {
        platform_macro(&self.platform, &self.framework)
    }
}

/// Emits one descriptor per package of a forest.
pub struct DescriptorEmitter<'a> {
    ctx: &'a EmitContext,
}

impl<'a> DescriptorEmitter<'a> {
    pub fn new(ctx: &'a EmitContext) -> Self {
        DescriptorEmitter { ctx }
    }

    /// Emit every package of the forest and return the build order.
    pub fn emit_forest(&self, forest: &DependencyForest) -> Result<BuildOrder, EmitError> {
        let mut order = BuildOrder::new();
        for root in &forest.roots {
            self.emit_node(root, &forest.category, &mut order)?;
        }
        Ok(order)
    }

    fn emit_node(
        &self,
        node: &PackageNode,
        category: &str,
        order: &mut BuildOrder,
    ) -> Result<(), EmitError> {
        for child in &node.children {
            self.emit_node(child, category, order)?;
        }

        let dir = self.ctx.artifact_dir(category, &node.identity);
        let descriptor = self.describe(node, category);
        let path = write_descriptor(&dir, &descriptor.render())?;
        debug!("wrote {}", path.display());

        order.push(dir);
        Ok(())
    }

    /// Build the descriptor record of one package.
    pub fn describe(&self, node: &PackageNode, category: &str) -> PackageDescriptor {
        let mut definitions = vec![self.ctx.platform_macro()];
        definitions.extend(node.compile_flags.iter().map(str::to_string));

        let dependencies = node
            .children
            .iter()
            .map(|child| LinkedDependency {
                include_dir: child.include_dir(),
                archive: self
                    .ctx
                    .artifact_dir(category, &child.identity)
                    .join(child.identity.archive_name()),
            })
            .collect();

        PackageDescriptor {
            identity: node.identity.clone(),
            toolchain_file: self.ctx.toolchain_file(),
            source_dir: node.source_dir(),
            include_dir: node.include_dir(),
            board: self.ctx.board.clone(),
            definitions,
            dependencies,
        }
    }
}

/// Create `dir` and write its descriptor file.
pub(crate) fn write_descriptor(dir: &Path, content: &str) -> Result<PathBuf, EmitError> {
    std::fs::create_dir_all(dir).map_err(|source| EmitError::DescriptorWrite {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(DESCRIPTOR_FILE);
    std::fs::write(&path, content).map_err(|source| EmitError::DescriptorWrite {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
