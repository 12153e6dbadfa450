//! `sail run` command

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::build::build_workspace;
use crate::GlobalOptions;
use sail::core::Workspace;
use sail::ops::sail_build::run_executable;
use sail::util::{GlobalContext, Status};

pub fn execute(args: RunArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let ws = Workspace::discover(&ctx)?;

    build_workspace(&ws, global_opts)?;

    let executable = ws.executable_path();
    let shown = executable
        .strip_prefix(ws.root())
        .unwrap_or(executable.as_path())
        .display()
        .to_string();
    global_opts.shell.status(Status::Running, shown);

    run_executable(&ws, &args.args)
}
