//! `sail clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use crate::GlobalOptions;
use sail::core::Workspace;
use sail::ops::sail_clean::clean;
use sail::util::{GlobalContext, Status};

pub fn execute(_args: CleanArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = GlobalContext::new()?;
    let ws = Workspace::discover(&ctx)?;

    if clean(&ws)? {
        shell.status(Status::Removed, ws.target_dir().display());
    } else {
        shell.status(Status::Skipped, "nothing to clean");
    }
    Ok(())
}
