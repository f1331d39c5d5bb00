//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// wio - dependency resolution and CMake generation for AVR projects
#[derive(Parser)]
#[command(name = "wio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover dependencies and rewrite the lock files
    Resolve(ResolveArgs),

    /// Write CMake descriptors for one or all targets
    Generate(GenerateArgs),

    /// Generate and build a target with CMake and make
    Build(BuildArgs),

    /// Display the dependency tree
    Tree(TreeArgs),

    /// Remove generated target output
    Clean(CleanArgs),

    /// List the project's targets
    Targets,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Print the lock records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Directory holding `toolchain/cmake/<Framework>Toolchain.cmake`
    #[arg(long, env = "WIO_TOOLCHAIN_ROOT", value_name = "DIR")]
    pub toolchain_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Target to generate
    #[arg(short, long, default_value = "default", conflicts_with = "all_targets")]
    pub target: String,

    /// Generate every declared target
    #[arg(long)]
    pub all_targets: bool,

    #[command(flatten)]
    pub toolchain: ToolchainArgs,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Target to build
    #[arg(short, long, default_value = "default")]
    pub target: String,

    /// Remove the target's generated output before building
    #[arg(long)]
    pub clean: bool,

    #[command(flatten)]
    pub toolchain: ToolchainArgs,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Only clean this target
    #[arg(short, long)]
    pub target: Option<String>,
}
