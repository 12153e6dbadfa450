//! Implementation of `sail clean`.

use anyhow::Result;

use crate::core::Workspace;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove the workspace's `target/` directory.
///
/// Returns `false` when there was nothing to remove.
pub fn clean(ws: &Workspace) -> Result<bool> {
    let target_dir = ws.target_dir();
    let removed = remove_dir_all_if_exists(&target_dir)?;
    if removed {
        tracing::debug!("removed {}", target_dir.display());
    } else {
        tracing::debug!("{} does not exist", target_dir.display());
    }
    Ok(removed)
}
