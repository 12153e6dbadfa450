//! Implementation of `sail add`.

use anyhow::Result;

use crate::core::catalog::DependencyCatalog;
use crate::core::dependency::{DependencyEntry, DependencySpec};
use crate::core::manifest::{parse_dependencies, set_dependency, ManifestStore};

/// Options for adding a dependency.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// `name` or `name@version`
    pub spec: DependencySpec,

    /// Compute the change without writing the manifest
    pub dry_run: bool,
}

/// What `add_dependency` did to the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// The dependency was not present before.
    Added(DependencyEntry),

    /// The dependency was present with another version.
    Updated {
        name: String,
        from: String,
        to: String,
    },

    /// The dependency was already at the requested version.
    AlreadyPresent(DependencyEntry),
}

/// Add or update a dependency in the manifest.
///
/// The version is resolved before the manifest is read, so an unrecognized
/// dependency without a version never touches the file.
pub fn add_dependency(
    store: &ManifestStore,
    catalog: &DependencyCatalog,
    opts: &AddOptions,
) -> Result<AddResult> {
    let entry = opts.spec.resolve(catalog)?;

    let text = store.load()?;
    let existing = parse_dependencies(&text);

    let result = match existing.get(&entry.name) {
        Some(current) if *current == entry.version => AddResult::AlreadyPresent(entry.clone()),
        Some(current) => {
            tracing::debug!("updating {} from {} to {}", entry.name, current, entry.version);
            AddResult::Updated {
                name: entry.name.clone(),
                from: current.clone(),
                to: entry.version.clone(),
            }
        }
        None => {
            tracing::debug!("adding {} version {}", entry.name, entry.version);
            AddResult::Added(entry.clone())
        }
    };

    // Skipped means untouched, even when the existing line is not canonical.
    if !opts.dry_run && !matches!(result, AddResult::AlreadyPresent(_)) {
        store.save(&set_dependency(&text, &entry))?;
    }

    Ok(result)
}
