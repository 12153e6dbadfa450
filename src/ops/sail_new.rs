//! Implementation of `sail new` and `sail init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::manifest::{generate_manifest, MANIFEST_NAME};
use crate::core::workspace::ManifestError;

const MAIN_CPP: &str = r#"#include <iostream>

int main() {
    std::cout << "Hello, World!" << "\n";
    return 0;
}
"#;

const GITIGNORE: &str = r#"# Sail build artifacts
target/

# Editor files
*.swp
*~
.vscode/
.idea/
"#;

/// Options for creating a new project.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Project name; may be a relative path whose last component names the package
    pub name: String,

    /// Directory the project directory is created in
    pub path: PathBuf,
}

/// Result of scaffolding a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult {
    /// Package name written to the manifest
    pub package: String,

    /// Project root directory
    pub root: PathBuf,
}

/// Create a new Sail project at `opts.path/opts.name`.
pub fn new_project(opts: &NewOptions) -> Result<NewResult> {
    let root = opts.path.join(&opts.name);

    if root.exists() {
        bail!(
            "destination `{}` already exists\n\
             \n\
             help: use `sail init` to initialize an existing directory",
            root.display()
        );
    }

    let package = package_name(Path::new(&opts.name))?;

    fs::create_dir_all(root.join("src"))
        .with_context(|| format!("failed to create directory: {}", root.display()))?;

    fs::write(root.join(MANIFEST_NAME), generate_manifest(&package))
        .with_context(|| format!("failed to write {}", MANIFEST_NAME))?;
    fs::write(root.join("src").join("main.cpp"), MAIN_CPP)
        .with_context(|| "failed to write src/main.cpp")?;
    fs::write(root.join(".gitignore"), GITIGNORE).with_context(|| "failed to write .gitignore")?;

    tracing::debug!("created package `{}` at {}", package, root.display());
    Ok(NewResult { package, root })
}

/// Initialize a Sail project in an existing directory.
///
/// `src/main.cpp` is only written when there is no `src/` directory yet.
pub fn init_project(dir: &Path) -> Result<NewResult> {
    let manifest_path = dir.join(MANIFEST_NAME);
    if manifest_path.exists() {
        return Err(ManifestError::AlreadyExists {
            dir: dir.to_path_buf(),
        }
        .into());
    }

    let package = package_name(dir)?;

    fs::write(&manifest_path, generate_manifest(&package))
        .with_context(|| format!("failed to write {}", MANIFEST_NAME))?;

    let src_dir = dir.join("src");
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir).with_context(|| "failed to create src directory")?;
        fs::write(src_dir.join("main.cpp"), MAIN_CPP)
            .with_context(|| "failed to write src/main.cpp")?;
    }

    tracing::debug!("initialized package `{}` in {}", package, dir.display());
    Ok(NewResult {
        package,
        root: dir.to_path_buf(),
    })
}

/// The last path component, which must be usable as a package name.
fn package_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.is_empty() || name.contains(|c: char| c == '"' || c.is_whitespace()) {
        bail!("invalid package name `{}`", path.display());
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{parse_dependencies, PackageMetadata};
    use tempfile::TempDir;

    #[test]
    fn test_new_project() {
        let tmp = TempDir::new().unwrap();
        let opts = NewOptions {
            name: "myapp".to_string(),
            path: tmp.path().to_path_buf(),
        };

        let result = new_project(&opts).unwrap();

        let root = tmp.path().join("myapp");
        assert_eq!(result.root, root);
        assert!(root.join("src/main.cpp").exists());
        assert!(root.join(".gitignore").exists());

        let manifest = fs::read_to_string(root.join(MANIFEST_NAME)).unwrap();
        assert_eq!(PackageMetadata::from_manifest(&manifest, "x").name, "myapp");
        assert!(manifest.contains("edition = \"2021\""));
        assert!(manifest.contains("[dependencies]"));
        assert!(parse_dependencies(&manifest).is_empty());
    }

    #[test]
    fn test_new_nested_name_uses_last_component() {
        let tmp = TempDir::new().unwrap();
        let opts = NewOptions {
            name: "apps/tool".to_string(),
            path: tmp.path().to_path_buf(),
        };

        let result = new_project(&opts).unwrap();
        assert_eq!(result.package, "tool");
        assert!(tmp.path().join("apps/tool/Sail.toml").exists());
    }

    #[test]
    fn test_new_fails_if_exists() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("taken")).unwrap();
        let opts = NewOptions {
            name: "taken".to_string(),
            path: tmp.path().to_path_buf(),
        };

        let err = new_project(&opts).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_init_existing_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("existing");
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src/app.cpp"), "int main() {}").unwrap();

        let result = init_project(&dir).unwrap();

        assert_eq!(result.package, "existing");
        assert!(dir.join(MANIFEST_NAME).exists());
        // Existing sources are left alone
        assert!(!dir.join("src/main.cpp").exists());
    }

    #[test]
    fn test_init_creates_main_when_no_src() {
        let tmp = TempDir::new().unwrap();
        init_project(tmp.path()).unwrap();
        assert!(tmp.path().join("src/main.cpp").exists());
    }

    #[test]
    fn test_init_fails_if_manifest_exists() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_NAME), "[package]\n").unwrap();

        let err = init_project(tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::AlreadyExists { .. })
        ));
        assert_eq!(
            fs::read_to_string(tmp.path().join(MANIFEST_NAME)).unwrap(),
            "[package]\n"
        );
    }
}
