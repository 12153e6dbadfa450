//! `sail test` command

use anyhow::Result;

use crate::cli::TestArgs;
use crate::commands::build::build_workspace;
use crate::GlobalOptions;
use sail::builder::CMakeBuilder;
use sail::core::Workspace;
use sail::util::{GlobalContext, Status};

pub fn execute(_args: TestArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let ws = Workspace::discover(&ctx)?;

    build_workspace(&ws, global_opts)?;

    global_opts.shell.status(Status::Running, "ctest");
    CMakeBuilder::new(&ws)?.test()
}
