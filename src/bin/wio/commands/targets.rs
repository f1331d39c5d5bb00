//! `wio targets` command

use anyhow::Result;

use wio::util::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let project = ctx.load_project()?;

    if project.targets().is_empty() {
        eprintln!("project `{}` declares no targets", project.name());
        return Ok(());
    }

    for target in project.targets() {
        let marker = if target.is_default { " (default)" } else { "" };
        print!("{} [{}]{}", target.name, target.board, marker);
        if !target.compile_flags.is_empty() {
            print!(" {}", target.compile_flags.iter().collect::<Vec<_>>().join(" "));
        }
        println!();
    }

    Ok(())
}
