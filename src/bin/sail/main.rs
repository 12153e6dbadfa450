//! Sail CLI - a minimal project manager for C++

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use sail::util::{ProcessError, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        // A failing child program (cmake, the built executable, ctest)
        // decides the exit code.
        let code = e
            .downcast_ref::<ProcessError>()
            .map(ProcessError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("sail=debug")
    } else if cli.quiet {
        EnvFilter::new("sail=warn")
    } else {
        EnvFilter::new("sail=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let global_opts = GlobalOptions {
        shell: Shell::from_flags(cli.quiet, cli.verbose, cli.color),
    };

    match cli.command {
        Commands::New(args) => commands::new::execute(args, &global_opts),
        Commands::Init(args) => commands::init::execute(args, &global_opts),
        Commands::Build(args) => commands::build::execute(args, &global_opts),
        Commands::Run(args) => commands::run::execute(args, &global_opts),
        Commands::Clean(args) => commands::clean::execute(args, &global_opts),
        Commands::Test(args) => commands::test::execute(args, &global_opts),
        Commands::Add(args) => commands::add::execute(args, &global_opts),
    }
}
