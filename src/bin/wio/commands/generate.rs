//! `wio generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use wio::ops::{generate, GenerateOptions, TargetSelection};
use wio::util::config::resolve_toolchain_root;
use wio::util::fs::display_relative;
use wio::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: GenerateArgs) -> Result<()> {
    let project = ctx.load_project()?;
    let config = ctx.load_config(&project)?;

    let targets = if args.all_targets {
        TargetSelection::All
    } else {
        TargetSelection::One(args.target)
    };
    let toolchain_root = resolve_toolchain_root(args.toolchain.toolchain_root.as_deref(), &config)?;

    let report = generate(
        &project,
        &config,
        &GenerateOptions {
            targets,
            toolchain_root,
        },
    )?;

    for generated in &report.generated {
        eprintln!(
            "   Generated `{}` ({} packages) -> {}",
            generated.target,
            generated.build_order.len(),
            display_relative(ctx.cwd(), &generated.root_descriptor).display()
        );
    }

    report.into_result()?;
    Ok(())
}
