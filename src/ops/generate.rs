//! Descriptor generation for one or more targets.
//!
//! Resolution runs once; each target is then generated on its own. A failing
//! target is recorded in the report and does not stop the others.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::{
    emit_root, BuildOrder, CategoryLock, DescriptorEmitter, EmitContext, RootInputs,
};
use crate::core::target::DEFAULT_TARGET_ALIAS;
use crate::core::{Project, Target};
use crate::ops::lockfile::load_lockfile;
use crate::ops::resolve::{resolve_project, ResolvedCategory};
use crate::util::fs::remove_file_if_exists;
use crate::util::Config;

/// Which targets to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// One target by name, `default` meaning the default target
    One(String),
    All,
}

impl Default for TargetSelection {
    fn default() -> Self {
        TargetSelection::One(DEFAULT_TARGET_ALIAS.to_string())
    }
}

/// Options for descriptor generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub targets: TargetSelection,
    pub toolchain_root: PathBuf,
}

/// Everything written for one target.
#[derive(Debug, Clone)]
pub struct GeneratedTarget {
    pub target: String,
    pub root_descriptor: PathBuf,
    pub build_order_path: PathBuf,
    pub build_order: BuildOrder,
}

/// Outcome of generating several targets.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub generated: Vec<GeneratedTarget>,
    pub failed: Vec<(String, anyhow::Error)>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turn any target failure into an error naming every failed target.
    pub fn into_result(mut self) -> Result<Vec<GeneratedTarget>> {
        match self.failed.len() {
            0 => Ok(self.generated),
            1 => {
                let (target, err) = self.failed.remove(0);
                Err(err.context(format!("failed to generate target `{}`", target)))
            }
            _ => {
                let names: Vec<_> = self.failed.iter().map(|(t, _)| format!("`{}`", t)).collect();
                bail!("failed to generate targets {}", names.join(", "))
            }
        }
    }
}

/// Resolve the project and generate descriptors for the selected targets.
pub fn generate(
    project: &Project,
    config: &Config,
    opts: &GenerateOptions,
) -> Result<GenerateReport> {
    let targets: Vec<&Target> = match &opts.targets {
        TargetSelection::One(name) => vec![project.select_target(name)?],
        TargetSelection::All => {
            if project.targets().is_empty() {
                // Fails with the "no targets" help.
                project.select_target(DEFAULT_TARGET_ALIAS)?;
            }
            project.targets().iter().collect()
        }
    };

    let categories = config.categories()?;
    let resolved = resolve_project(project, &categories)?;

    let mut report = GenerateReport::default();
    for target in targets {
        tracing::info!("Generating target `{}` ({})", target.name, target.board);
        match generate_target(project, &resolved, target, &opts.toolchain_root) {
            Ok(generated) => report.generated.push(generated),
            Err(err) => {
                tracing::error!("target `{}` failed: {:#}", target.name, err);
                report.failed.push((target.name.clone(), err));
            }
        }
    }

    Ok(report)
}

/// Emit every descriptor of one target, its build order and its root
/// descriptor.
pub fn generate_target(
    project: &Project,
    resolved: &[ResolvedCategory],
    target: &Target,
    toolchain_root: &Path,
) -> Result<GeneratedTarget> {
    let ctx = EmitContext {
        project_root: project.root().to_path_buf(),
        target: target.name.clone(),
        board: target.board.clone(),
        platform: project.platform().to_string(),
        framework: project.framework().to_string(),
        toolchain_root: toolchain_root.to_path_buf(),
    };

    // A failed emission must not leave the previous order behind.
    let build_order_path = project.build_order_path(&target.name);
    remove_file_if_exists(&build_order_path)?;

    let emitter = DescriptorEmitter::new(&ctx);
    let mut order = BuildOrder::new();
    for rc in resolved {
        order.extend(emitter.emit_forest(&rc.forest)?);
    }

    order
        .write(&build_order_path)
        .context("failed to write build order")?;

    // The root descriptor is driven by what was locked, not by the forests.
    let locks = resolved
        .iter()
        .map(|rc| {
            Ok(CategoryLock {
                category: rc.category.name.clone(),
                record: load_lockfile(&rc.lockfile)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let root_descriptor = emit_root(&RootInputs {
        ctx: &ctx,
        project_name: project.name(),
        kind: project.kind(),
        target_flags: &target.compile_flags,
        library_flags: &project.manifest().project.compile_flags,
        locks: &locks,
    })?;

    tracing::info!(
        "Generated {} package descriptors for `{}`",
        order.len(),
        target.name
    );

    Ok(GeneratedTarget {
        target: target.name.clone(),
        root_descriptor,
        build_order_path,
        build_order: order,
    })
}
