//! `sail add` command

use anyhow::Result;

use crate::cli::AddArgs;
use crate::GlobalOptions;
use sail::core::catalog::Classification;
use sail::core::{DependencyCatalog, DependencySpec, ManifestStore};
use sail::ops::sail_add::{add_dependency, AddOptions, AddResult};
use sail::util::{GlobalContext, Status};

pub fn execute(args: AddArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;

    let spec = DependencySpec::parse(&args.spec)?;

    let ctx = GlobalContext::new()?;
    let store = ManifestStore::new(ctx.find_manifest()?);

    let catalog = DependencyCatalog::builtin();
    if spec.version.is_some() && catalog.classify(&spec.name) == Classification::Unrecognized {
        shell.warn(format!(
            "`{}` is not in the built-in catalog; the build only gets a placeholder for it",
            spec.name
        ));
    }

    let opts = AddOptions {
        spec,
        dry_run: args.dry_run,
    };

    match add_dependency(&store, &catalog, &opts)? {
        AddResult::Added(entry) => {
            if args.dry_run {
                shell.status(Status::Info, format!("Would add {}", entry));
            } else {
                shell.status(Status::Added, entry);
            }
        }
        AddResult::Updated { name, from, to } => {
            if args.dry_run {
                shell.status(
                    Status::Info,
                    format!("Would update {} v{} -> v{}", name, from, to),
                );
            } else {
                shell.status(Status::Updated, format!("{} v{} -> v{}", name, from, to));
            }
        }
        AddResult::AlreadyPresent(entry) => {
            shell.status(
                Status::Skipped,
                format!("{} (already in dependencies)", entry),
            );
        }
    }

    Ok(())
}
