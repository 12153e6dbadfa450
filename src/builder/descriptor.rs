//! CMakeLists.txt generation.
//!
//! [`DescriptorGenerator`] turns a dependency mapping into three blocks of
//! CMake directives using the [`DependencyCatalog`]. [`render_cmakelists`]
//! wraps those blocks in the fixed project boilerplate. Nothing is merged
//! with a previous descriptor: every build regenerates it from scratch.

use crate::core::catalog::{render_template, DependencyCatalog};
use crate::core::dependency::DependencyMapping;
use crate::util::config::{Config, CMAKE_MINIMUM_VERSION};

/// The generated directive blocks, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorBlocks {
    /// `find_package` and related setup for system-installed packages
    pub system_lookups: String,

    /// `CPMAddPackage` declarations
    pub fetches: String,

    /// `target_link_libraries` directives
    pub links: String,
}

impl DescriptorBlocks {
    /// All three blocks joined in their fixed order.
    pub fn joined(&self) -> String {
        let mut out =
            String::with_capacity(self.system_lookups.len() + self.fetches.len() + self.links.len());
        out.push_str(&self.system_lookups);
        out.push_str(&self.fetches);
        out.push_str(&self.links);
        out
    }
}

/// Renders dependency directives from catalog templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorGenerator {
    catalog: DependencyCatalog,
}

impl DescriptorGenerator {
    pub fn new(catalog: DependencyCatalog) -> Self {
        DescriptorGenerator { catalog }
    }

    /// Generate all three blocks for `dependencies`.
    pub fn generate(&self, dependencies: &DependencyMapping) -> DescriptorBlocks {
        DescriptorBlocks {
            system_lookups: self.system_lookups(dependencies),
            fetches: self.fetches(dependencies),
            links: self.links(dependencies),
        }
    }

    /// System lookups for every dependency that has one.
    pub fn system_lookups(&self, dependencies: &DependencyMapping) -> String {
        let mut out = String::new();
        for (name, version) in dependencies {
            if let Some(template) = self.catalog.get(name).and_then(|e| e.system_lookup) {
                out.push_str(&render_template(template, version));
                out.push('\n');
            }
        }
        out
    }

    /// One fetch line per dependency.
    ///
    /// Dependencies without a fetch template get a commented-out placeholder
    /// so they remain visible in the descriptor.
    pub fn fetches(&self, dependencies: &DependencyMapping) -> String {
        let mut out = String::new();
        for (name, version) in dependencies {
            match self.catalog.get(name).and_then(|e| e.fetch) {
                Some(template) => out.push_str(&render_template(template, version)),
                None => out.push_str(&fetch_placeholder(name, version)),
            }
            out.push('\n');
        }
        out
    }

    /// Link directives, which do not depend on the version.
    pub fn links(&self, dependencies: &DependencyMapping) -> String {
        let mut out = String::new();
        for name in dependencies.keys() {
            if let Some(link) = self.catalog.get(name).and_then(|e| e.link) {
                out.push_str(link);
                out.push('\n');
            }
        }
        out
    }
}

fn fetch_placeholder(name: &str, version: &str) -> String {
    format!("# CPMAddPackage(\"{} version {}\")", name, version)
}

/// Settings for the descriptor boilerplate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSettings {
    pub cmake_minimum: String,
    pub cxx_standard: u32,
}

impl DescriptorSettings {
    pub fn from_config(config: &Config) -> Self {
        DescriptorSettings {
            cmake_minimum: CMAKE_MINIMUM_VERSION.to_string(),
            cxx_standard: config.cxx_standard(),
        }
    }
}

impl Default for DescriptorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

const PROLOGUE: &str = r#"cmake_minimum_required(VERSION @CMAKE_MINIMUM@)

# Read project info from Sail.toml
file(READ "${CMAKE_SOURCE_DIR}/../../Sail.toml" SAIL_TOML)
string(REGEX MATCH "name = \"([^\"]+)\"" _ "${SAIL_TOML}")
set(PROJECT_NAME ${CMAKE_MATCH_1})
string(REGEX MATCH "version = \"([^\"]+)\"" _ "${SAIL_TOML}")
set(PROJECT_VERSION ${CMAKE_MATCH_1})

project(${PROJECT_NAME} VERSION ${PROJECT_VERSION})

set(CMAKE_CXX_STANDARD @CXX_STANDARD@)
set(CMAKE_CXX_STANDARD_REQUIRED ON)

# System Dependencies
"#;

const FETCH_HEADER: &str = r#"
# CPM Package Manager
include(cmake/CPM.cmake)

# CPM Dependencies from Sail.toml
"#;

const SOURCES: &str = r#"
# Source files
file(GLOB_RECURSE SOURCES "${CMAKE_SOURCE_DIR}/../../src/*.cpp")
file(GLOB_RECURSE HEADERS "${CMAKE_SOURCE_DIR}/../../src/*.hpp" "${CMAKE_SOURCE_DIR}/../../include/*.hpp")

add_executable(${PROJECT_NAME} ${SOURCES} ${HEADERS})
target_include_directories(${PROJECT_NAME} PRIVATE "${CMAKE_SOURCE_DIR}/../../src" "${CMAKE_SOURCE_DIR}/../../include")

# Link dependencies
"#;

/// Wrap the generated blocks in the project boilerplate.
pub fn render_cmakelists(blocks: &DescriptorBlocks, settings: &DescriptorSettings) -> String {
    let mut out = PROLOGUE
        .replace("@CMAKE_MINIMUM@", &settings.cmake_minimum)
        .replace("@CXX_STANDARD@", &settings.cxx_standard.to_string());
    out.push_str(&blocks.system_lookups);
    out.push_str(FETCH_HEADER);
    out.push_str(&blocks.fetches);
    out.push_str(SOURCES);
    out.push_str(&blocks.links);
    out
}

const CPM_BOOTSTRAP: &str = r#"# CPM.cmake - A simple Git-based package manager for CMake
# Download CPM.cmake from GitHub if not exists
set(CPM_DOWNLOAD_VERSION @CPM_VERSION@)
if(CPM_SOURCE_CACHE)
  set(CPM_DOWNLOAD_LOCATION "${CPM_SOURCE_CACHE}/cpm/CPM_${CPM_DOWNLOAD_VERSION}.cmake")
elseif(DEFINED ENV{CPM_SOURCE_CACHE})
  set(CPM_DOWNLOAD_LOCATION "$ENV{CPM_SOURCE_CACHE}/cpm/CPM_${CPM_DOWNLOAD_VERSION}.cmake")
else()
  set(CPM_DOWNLOAD_LOCATION "${CMAKE_BINARY_DIR}/cmake/CPM_${CPM_DOWNLOAD_VERSION}.cmake")
endif()

if(NOT (EXISTS ${CPM_DOWNLOAD_LOCATION}))
  message(STATUS "Downloading CPM.cmake to ${CPM_DOWNLOAD_LOCATION}")
  file(DOWNLOAD
       https://github.com/cpm-cmake/CPM.cmake/releases/download/v${CPM_DOWNLOAD_VERSION}/CPM.cmake
       ${CPM_DOWNLOAD_LOCATION}
  )
endif()

include(${CPM_DOWNLOAD_LOCATION})
"#;

/// The `cmake/CPM.cmake` script that downloads CPM on first configure.
pub fn render_cpm_bootstrap(cpm_version: &str) -> String {
    CPM_BOOTSTRAP.replace("@CPM_VERSION@", cpm_version)
}
