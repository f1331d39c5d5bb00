//! wio CLI - dependency resolution and CMake generation for AVR projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wio::util::diagnostic::emit;
use wio::{GlobalContext, ResolveError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("wio=debug")
    } else {
        EnvFilter::new("wio=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let ctx = match cli.dir {
        Some(dir) => GlobalContext::with_cwd(dir)?,
        None => GlobalContext::new()?,
    };

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(&ctx, args),
        Commands::Generate(args) => commands::generate::execute(&ctx, args),
        Commands::Build(args) => commands::build::execute(&ctx, args),
        Commands::Tree(args) => commands::tree::execute(&ctx, args),
        Commands::Clean(args) => commands::clean::execute(&ctx, args),
        Commands::Targets => commands::targets::execute(&ctx),
    }
}

/// Resolution failures get a full diagnostic; everything else prints its
/// context chain.
fn report(err: &anyhow::Error, color: bool) {
    match err.chain().find_map(|e| e.downcast_ref::<ResolveError>()) {
        Some(resolve) => {
            let mut diagnostic = resolve.to_diagnostic();
            if err.to_string() != resolve.to_string() {
                diagnostic = diagnostic.with_context(err.to_string());
            }
            emit(&diagnostic, color);
        }
        None => eprintln!("error: {:#}", err),
    }
}
