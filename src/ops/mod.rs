//! High-level operations.
//!
//! This module contains the implementation of Sail commands.

pub mod sail_add;
pub mod sail_build;
pub mod sail_clean;
pub mod sail_new;

pub use sail_add::{add_dependency, AddOptions, AddResult};
pub use sail_build::{build, generate, run_executable, GeneratedProject};
pub use sail_clean::clean;
pub use sail_new::{init_project, new_project, NewOptions, NewResult};
