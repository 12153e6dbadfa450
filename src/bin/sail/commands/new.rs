//! `sail new` command

use anyhow::Result;

use crate::cli::NewArgs;
use crate::GlobalOptions;
use sail::ops::sail_new::{new_project, NewOptions};
use sail::util::Status;

pub fn execute(args: NewArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;

    let opts = NewOptions {
        name: args.name.clone(),
        path: args.path,
    };

    let result = new_project(&opts)?;

    shell.status(
        Status::Created,
        format!("binary (application) `{}` package", result.package),
    );
    shell.note(format!(
        "to get started: cd {} && sail build",
        result.root.display()
    ));

    Ok(())
}
