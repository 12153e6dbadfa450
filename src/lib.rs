//! Sail - a minimal project manager for C++
//!
//! This crate provides the library behind the `sail` command: reading and
//! editing the `[dependencies]` section of `Sail.toml`, the built-in
//! dependency catalog, CMake descriptor generation and the operations that
//! drive CMake.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use core::{
    catalog::DependencyCatalog,
    dependency::{DependencyEntry, DependencyMapping, DependencySpec},
    manifest::ManifestStore,
    workspace::Workspace,
};

pub use util::context::GlobalContext;
