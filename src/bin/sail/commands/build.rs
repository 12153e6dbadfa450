//! `sail build` command

use std::time::Instant;

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::GlobalOptions;
use sail::core::{DependencyCatalog, Workspace};
use sail::ops::sail_build::build;
use sail::util::shell::format_duration;
use sail::util::{GlobalContext, Status};

pub fn execute(_args: BuildArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = GlobalContext::new()?;
    let ws = Workspace::discover(&ctx)?;

    let start = Instant::now();
    build_workspace(&ws, global_opts)?;

    shell.status(
        Status::Finished,
        format!(
            "`{}` v{} in {}",
            ws.package().name,
            ws.package().version,
            format_duration(start.elapsed())
        ),
    );
    Ok(())
}

/// Regenerate and build `ws`, reporting progress on the shell.
pub fn build_workspace(ws: &Workspace, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;

    shell.status(Status::Generating, "CMakeLists.txt");
    shell.status(
        Status::Building,
        format!("{} v{}", ws.package().name, ws.package().version),
    );
    let generated = build(ws, &DependencyCatalog::builtin())?;

    if shell.is_verbose() {
        shell.note(format!(
            "{} dependencies rendered into {}",
            generated.dependencies,
            generated.descriptor.display()
        ));
    }
    Ok(())
}
