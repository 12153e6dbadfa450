//! `sail init` command

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use sail::ops::sail_new::init_project;
use sail::util::{GlobalContext, Status};

pub fn execute(_args: InitArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let result = init_project(ctx.cwd())?;

    global_opts.shell.status(
        Status::Created,
        format!("binary (application) `{}` package", result.package),
    );
    Ok(())
}
