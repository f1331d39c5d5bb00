//! `wio clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use wio::ops::clean;
use wio::util::fs::display_relative;
use wio::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: CleanArgs) -> Result<()> {
    let project = ctx.load_project()?;

    let removed = clean(&project, args.target.as_deref())?;
    if removed.is_empty() {
        eprintln!("     Nothing to clean");
    }
    for dir in removed {
        eprintln!("     Removed {}", display_relative(ctx.cwd(), &dir).display());
    }

    Ok(())
}
