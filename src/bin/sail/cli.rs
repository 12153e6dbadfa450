//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sail::util::ColorChoice;

/// Sail - a minimal project manager for C++
#[derive(Parser)]
#[command(name = "sail")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", env = "SAIL_COLOR", default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new Sail project
    New(NewArgs),

    /// Initialize a Sail project in the current directory
    Init(InitArgs),

    /// Generate the CMake project and build it
    Build(BuildArgs),

    /// Build and run the executable
    Run(RunArgs),

    /// Remove the target directory
    Clean(CleanArgs),

    /// Build and run tests with CTest
    Test(TestArgs),

    /// Add a dependency to Sail.toml
    Add(AddArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Project name
    pub name: String,

    /// Directory to create the project in
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct InitArgs {}

#[derive(Args)]
pub struct BuildArgs {}

#[derive(Args)]
pub struct RunArgs {
    /// Arguments passed to the executable
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct CleanArgs {}

#[derive(Args)]
pub struct TestArgs {}

#[derive(Args)]
pub struct AddArgs {
    /// Dependency as `name` or `name@version`
    pub spec: String,

    /// Show what would change without writing Sail.toml
    #[arg(long)]
    pub dry_run: bool,
}
