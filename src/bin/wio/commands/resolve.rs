//! `wio resolve` command

use anyhow::Result;
use serde_json::json;

use crate::cli::ResolveArgs;
use wio::ops::resolve_project;
use wio::util::fs::display_relative;
use wio::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: ResolveArgs) -> Result<()> {
    let project = ctx.load_project()?;
    let config = ctx.load_config(&project)?;
    let categories = config.categories()?;

    let resolved = resolve_project(&project, &categories)?;

    if args.json {
        let categories: Vec<_> = resolved
            .iter()
            .map(|rc| {
                json!({
                    "category": rc.category.name,
                    "lockfile": rc.lockfile,
                    "packages": rc.record.iter().collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "categories": categories }))?);
        return Ok(());
    }

    for rc in &resolved {
        eprintln!(
            "      Locked {} {} in {}",
            rc.record.len(),
            rc.category.name,
            display_relative(ctx.cwd(), &rc.lockfile).display()
        );
    }

    Ok(())
}
