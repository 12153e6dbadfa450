//! Core data structures for Sail.
//!
//! This module contains the foundational types used throughout Sail:
//! - Dependency specs and the parsed dependency mapping
//! - The built-in dependency catalog
//! - Manifest reading and section editing
//! - Workspace discovery

pub mod catalog;
pub mod dependency;
pub mod manifest;
pub mod workspace;

pub use catalog::DependencyCatalog;
pub use dependency::{DependencyEntry, DependencyError, DependencyMapping, DependencySpec};
pub use manifest::{ManifestStore, MANIFEST_NAME};
pub use workspace::{find_manifest, ManifestError, Workspace};
