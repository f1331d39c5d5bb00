//! `wio build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use wio::ops::{build, BuildOptions};
use wio::util::config::resolve_toolchain_root;
use wio::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: BuildArgs) -> Result<()> {
    let project = ctx.load_project()?;
    let config = ctx.load_config(&project)?;
    let toolchain_root = resolve_toolchain_root(args.toolchain.toolchain_root.as_deref(), &config)?;

    let opts = BuildOptions {
        target: args.target,
        clean: args.clean,
        toolchain_root,
    };

    let target = build(&project, &config, &opts)?;
    eprintln!("    Finished target `{}`", target);

    Ok(())
}
