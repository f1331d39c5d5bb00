//! `wio tree` command

use anyhow::Result;

use crate::cli::TreeArgs;
use wio::core::PackageNode;
use wio::ops::resolve_category;
use wio::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: TreeArgs) -> Result<()> {
    let project = ctx.load_project()?;
    let config = ctx.load_config(&project)?;
    let max_depth = args.depth.unwrap_or(usize::MAX);

    println!("{}", project.name());
    for category in config.categories()? {
        let resolved = resolve_category(&project, &category)?;
        if resolved.forest.is_empty() {
            continue;
        }

        println!("[{}]", category.name);
        let count = resolved.forest.roots.len();
        for (i, node) in resolved.forest.roots.iter().enumerate() {
            print_tree(node, "", i + 1 == count, 1, max_depth);
        }
    }

    Ok(())
}

fn print_tree(node: &PackageNode, prefix: &str, last: bool, depth: usize, max_depth: usize) {
    if depth > max_depth {
        return;
    }

    let branch = if last { "└── " } else { "├── " };
    let mut line = format!("{}{}{}", prefix, branch, node.name);
    if node.identity.as_str() != node.name {
        line.push_str(&format!(" ({})", node.identity));
    }
    if !node.compile_flags.is_empty() {
        line.push_str(&format!(
            " [{}]",
            node.compile_flags.iter().collect::<Vec<_>>().join(" ")
        ));
    }
    println!("{}", line);

    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        print_tree(child, &child_prefix, i + 1 == count, depth + 1, max_depth);
    }
}
