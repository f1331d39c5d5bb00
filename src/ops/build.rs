//! Implementation of `wio build`.
//!
//! Generates the target, then drives CMake and make over the generated
//! descriptors: every package directory in build-order file order, then the
//! root descriptor. The first failing command stops the build.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::BuildOrder;
use crate::core::Project;
use crate::ops::clean::clean_target;
use crate::ops::generate::{generate, GenerateOptions, TargetSelection};
use crate::util::fs::ensure_dir;
use crate::util::process::{find_cmake, find_make, ProcessBuilder};
use crate::util::Config;

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Target name, or `default`
    pub target: String,

    /// Remove the target's generated files first
    pub clean: bool,

    pub toolchain_root: PathBuf,
}

/// Configure and compile one directory.
#[derive(Debug, Clone)]
pub struct BuildStep {
    pub dir: PathBuf,
    pub configure: ProcessBuilder,
    pub make: ProcessBuilder,
}

/// Ordered build commands for one target.
#[derive(Debug, Clone, Default)]
pub struct BuildPlan {
    pub steps: Vec<BuildStep>,
}

impl BuildPlan {
    /// Plan the build of a generated target.
    ///
    /// Package directories come from the build-order file; the root
    /// descriptor is configured from its `build/` subdirectory last.
    pub fn for_target(
        project: &Project,
        target: &str,
        config: &Config,
        cmake: &Path,
        make: &Path,
    ) -> Result<Self> {
        let order_path = project.build_order_path(target);
        let order = BuildOrder::read(&order_path).with_context(|| {
            format!(
                "target `{}` has not been generated\n\
                 help: run `wio generate --target {}`",
                target, target
            )
        })?;

        let step = |dir: &Path, source: &str| BuildStep {
            dir: dir.to_path_buf(),
            configure: ProcessBuilder::new(cmake)
                .args(["-G", config.generator(), source])
                .cwd(dir),
            make: ProcessBuilder::new(make)
                .args(config.build.jobs.map(|j| format!("-j{}", j)))
                .cwd(dir),
        };

        let mut steps: Vec<BuildStep> = order.dirs().iter().map(|dir| step(dir, ".")).collect();
        steps.push(step(&project.root_build_dir(target), ".."));

        Ok(BuildPlan { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, stopping at the first failure.
    pub fn execute(&self) -> Result<()> {
        for step in &self.steps {
            tracing::info!("Building {}", step.dir.display());
            ensure_dir(&step.dir)?;
            step.configure.status_and_check()?;
            step.make.status_and_check()?;
        }
        Ok(())
    }
}

/// Generate and build one target.
pub fn build(project: &Project, config: &Config, opts: &BuildOptions) -> Result<String> {
    let target = project.select_target(&opts.target)?.name.clone();

    if opts.clean {
        clean_target(project, &target)?;
    }

    generate(
        project,
        config,
        &GenerateOptions {
            targets: TargetSelection::One(target.clone()),
            toolchain_root: opts.toolchain_root.clone(),
        },
    )?
    .into_result()?;

    let Some(cmake) = find_cmake() else {
        bail!(
            "CMake not found\n\
             \n\
             CMake drives the toolchain for every package.\n\
             Install CMake and ensure it's in your PATH."
        );
    };
    let Some(make) = find_make(config.build.make.as_deref()) else {
        bail!(
            "make not found\n\
             help: install make or set `build.make` in .build/config.toml"
        );
    };

    let plan = BuildPlan::for_target(project, &target, config, &cmake, &make)?;
    tracing::info!("Building target `{}` ({} steps)", target, plan.len());
    plan.execute()
        .with_context(|| format!("build of target `{}` failed", target))?;

    Ok(target)
}
