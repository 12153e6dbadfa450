//! Built-in catalog of well-known C++ dependencies.
//!
//! Each record says how a dependency is located on the system, fetched with
//! CPM, and linked. Templates use `{version}` as the only placeholder. Adding
//! a dependency means adding a row to [`BUILTIN`]; nothing else changes.

/// Placeholder substituted with the dependency version in templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Render hints and defaults for one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Name as written in `[dependencies]`
    pub name: &'static str,

    /// Version recorded by `sail add <name>` when none is given
    pub default_version: Option<&'static str>,

    /// Directive locating a system-installed package
    pub system_lookup: Option<&'static str>,

    /// CPM directive fetching the package
    pub fetch: Option<&'static str>,

    /// Directive linking the generated executable against the package
    pub link: Option<&'static str>,
}

/// How the catalog treats a dependency name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In the catalog with a default version.
    Known,
    /// In the catalog, rendered, but `add` needs an explicit version.
    GenerationOnly,
    /// Not in the catalog; rendered as a placeholder only.
    Unrecognized,
}

const QT5_SETUP: &str = "# Qt5 Setup
find_package(Qt5 {version} REQUIRED COMPONENTS Core Widgets)
set(CMAKE_AUTOMOC ON)
set(CMAKE_AUTOUIC ON)
set(CMAKE_AUTORCC ON)
";

const QT6_SETUP: &str = "# Qt6 Setup
find_package(Qt6 {version} REQUIRED COMPONENTS Core Widgets)
set(CMAKE_AUTOMOC ON)
set(CMAKE_AUTOUIC ON)
set(CMAKE_AUTORCC ON)
qt_standard_project_setup()
";

/// The built-in table, sorted by name.
pub static BUILTIN: &[CatalogEntry] = &[
    CatalogEntry {
        name: "boost",
        default_version: None,
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:boostorg/boost#boost-{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE Boost::boost)"),
    },
    CatalogEntry {
        name: "catch2",
        default_version: Some("3.4.0"),
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:catchorg/Catch2#v{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE Catch2::Catch2WithMain)"),
    },
    CatalogEntry {
        name: "cli11",
        default_version: Some("2.3.2"),
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:CLIUtils/CLI11#v{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE CLI11::CLI11)"),
    },
    CatalogEntry {
        name: "curl",
        default_version: Some("system"),
        system_lookup: Some("find_package(CURL REQUIRED)"),
        fetch: None,
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE CURL::libcurl)"),
    },
    CatalogEntry {
        name: "eigen3",
        default_version: None,
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:libeigen/eigen#{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE Eigen3::Eigen)"),
    },
    CatalogEntry {
        name: "fmt",
        default_version: Some("10.1.1"),
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:fmtlib/fmt#{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE fmt::fmt)"),
    },
    CatalogEntry {
        name: "nlohmann_json",
        default_version: Some("3.11.2"),
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:nlohmann/json#v{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE nlohmann_json::nlohmann_json)"),
    },
    CatalogEntry {
        name: "opencv",
        default_version: None,
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:opencv/opencv#{version}\")"),
        link: Some(
            "target_link_libraries(${PROJECT_NAME} PRIVATE opencv_core opencv_imgproc opencv_imgcodecs)",
        ),
    },
    CatalogEntry {
        name: "opengl",
        default_version: Some("system"),
        system_lookup: Some("find_package(OpenGL REQUIRED)"),
        fetch: None,
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE OpenGL::GL)"),
    },
    CatalogEntry {
        name: "pkg-config",
        default_version: None,
        system_lookup: Some("find_package(PkgConfig REQUIRED)"),
        fetch: None,
        link: None,
    },
    CatalogEntry {
        name: "qt5",
        default_version: Some("5.15"),
        system_lookup: Some(QT5_SETUP),
        fetch: None,
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE Qt5::Core Qt5::Widgets)"),
    },
    CatalogEntry {
        name: "qt6",
        default_version: Some("6.5"),
        system_lookup: Some(QT6_SETUP),
        fetch: None,
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE Qt6::Core Qt6::Widgets)"),
    },
    CatalogEntry {
        name: "spdlog",
        default_version: Some("1.12.0"),
        system_lookup: None,
        fetch: Some("CPMAddPackage(\"gh:gabime/spdlog#v{version}\")"),
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE spdlog::spdlog)"),
    },
    CatalogEntry {
        name: "threads",
        default_version: Some("system"),
        system_lookup: Some("find_package(Threads REQUIRED)"),
        fetch: None,
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE Threads::Threads)"),
    },
    CatalogEntry {
        name: "zlib",
        default_version: Some("system"),
        system_lookup: Some("find_package(ZLIB REQUIRED)"),
        fetch: None,
        link: Some("target_link_libraries(${PROJECT_NAME} PRIVATE ZLIB::ZLIB)"),
    },
];

/// Name-keyed lookup over a table of [`CatalogEntry`] records.
#[derive(Debug, Clone, Copy)]
pub struct DependencyCatalog {
    entries: &'static [CatalogEntry],
}

impl DependencyCatalog {
    /// The catalog shipped with Sail.
    pub fn builtin() -> Self {
        DependencyCatalog { entries: BUILTIN }
    }

    /// Look up the record for `name`.
    pub fn get(&self, name: &str) -> Option<&'static CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Version recorded when the user gives none.
    pub fn default_version(&self, name: &str) -> Option<&'static str> {
        self.get(name).and_then(|entry| entry.default_version)
    }

    /// Whether `add` can pick a version for `name` on its own.
    pub fn is_recognized(&self, name: &str) -> bool {
        self.default_version(name).is_some()
    }

    pub fn classify(&self, name: &str) -> Classification {
        match self.get(name) {
            Some(entry) if entry.default_version.is_some() => Classification::Known,
            Some(_) => Classification::GenerationOnly,
            None => Classification::Unrecognized,
        }
    }

    /// Iterate all records.
    pub fn entries(&self) -> impl Iterator<Item = &'static CatalogEntry> {
        self.entries.iter()
    }
}

impl Default for DependencyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Substitute `version` into a template.
pub fn render_template(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_versions() {
        let catalog = DependencyCatalog::builtin();
        assert_eq!(catalog.default_version("fmt"), Some("10.1.1"));
        assert_eq!(catalog.default_version("spdlog"), Some("1.12.0"));
        assert_eq!(catalog.default_version("catch2"), Some("3.4.0"));
        assert_eq!(catalog.default_version("cli11"), Some("2.3.2"));
        assert_eq!(catalog.default_version("nlohmann_json"), Some("3.11.2"));
        assert_eq!(catalog.default_version("qt6"), Some("6.5"));
        assert_eq!(catalog.default_version("zlib"), Some("system"));
        assert_eq!(catalog.default_version("totally-unknown-lib"), None);
    }

    #[test]
    fn test_classification() {
        let catalog = DependencyCatalog::builtin();
        assert_eq!(catalog.classify("fmt"), Classification::Known);
        assert_eq!(catalog.classify("eigen3"), Classification::GenerationOnly);
        assert_eq!(catalog.classify("pkg-config"), Classification::GenerationOnly);
        assert_eq!(catalog.classify("leftpad"), Classification::Unrecognized);

        assert!(catalog.is_recognized("threads"));
        assert!(!catalog.is_recognized("boost"));
        assert!(!catalog.is_recognized("leftpad"));
    }

    #[test]
    fn test_table_is_sorted_and_unique() {
        let names: Vec<_> = BUILTIN.iter().map(|e| e.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_every_entry_renders_something() {
        for entry in DependencyCatalog::builtin().entries() {
            assert!(
                entry.system_lookup.is_some() || entry.fetch.is_some(),
                "`{}` has neither a lookup nor a fetch directive",
                entry.name
            );
        }
    }

    #[test]
    fn test_render_template() {
        let fetch = DependencyCatalog::builtin().get("spdlog").unwrap().fetch.unwrap();
        assert_eq!(
            render_template(fetch, "1.12.0"),
            "CPMAddPackage(\"gh:gabime/spdlog#v1.12.0\")"
        );
    }
}
