//! CMake project generation and driving.
//!
//! The descriptor module renders `CMakeLists.txt` from the dependency
//! mapping; the cmake module configures, builds and tests the result.

pub mod cmake;
pub mod descriptor;

pub use cmake::CMakeBuilder;
pub use descriptor::{DescriptorBlocks, DescriptorGenerator, DescriptorSettings};
