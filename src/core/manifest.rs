//! Sail.toml manifest handling.
//!
//! The manifest is treated as text, not as a TOML document. Only the
//! `[dependencies]` section is interpreted; every other line is opaque and
//! survives edits byte for byte. Package metadata is the one exception: it is
//! read with the `toml` crate when a build needs the project name.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::core::dependency::{DependencyEntry, DependencyMapping};
use crate::core::workspace::ManifestError;
use crate::util::fs;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Sail.toml";

/// Header line opening the dependencies section.
pub const DEPENDENCIES_HEADER: &str = "[dependencies]";

/// Version given to freshly scaffolded packages.
pub const DEFAULT_PACKAGE_VERSION: &str = "0.1.0";

fn trim_horizontal(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Any `[...]` line closes the current section, including a bare `[]`.
fn is_section_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// Key of a `key = value` line, split at the first `=`.
fn entry_key(line: &str) -> Option<&str> {
    line.split_once('=').map(|(key, _)| trim_horizontal(key))
}

/// Strip surrounding whitespace and one leading and one trailing `"`.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Split a line produced by `split_inclusive('\n')` into body and terminator.
fn split_line_ending(chunk: &str) -> (&str, &str) {
    if let Some(body) = chunk.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = chunk.strip_suffix('\n') {
        (body, "\n")
    } else {
        (chunk, "")
    }
}

/// Extract the `[dependencies]` mapping from manifest text.
///
/// Every non-empty line with an `=` is split at the first `=`; a leading
/// `#` is part of the key. Lines without `=`, or with an empty key or
/// value, are skipped. A later duplicate key overwrites an earlier one.
pub fn parse_dependencies(text: &str) -> DependencyMapping {
    let mut dependencies = DependencyMapping::new();
    let mut in_section = false;

    for raw in text.lines() {
        let line = trim_horizontal(raw);

        if line == DEPENDENCIES_HEADER {
            in_section = true;
            continue;
        }
        if is_section_header(line) {
            in_section = false;
            continue;
        }
        if !in_section || line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = trim_horizontal(key);
        let value = unquote(value);
        if key.is_empty() || value.is_empty() {
            tracing::debug!("skipping malformed dependency line `{}`", raw);
            continue;
        }

        dependencies.insert(key.to_string(), value.to_string());
    }

    dependencies
}

/// Set `entry` in the `[dependencies]` section of `text`.
///
/// Single pass over the lines:
/// - lines whose key matches `entry.name` are replaced by the canonical line;
/// - if the section is closed by another header without a match, the entry is
///   inserted just before that header;
/// - otherwise the entry is appended at the end, after a new
///   `[dependencies]` header when the manifest had none.
///
/// Every other line is copied verbatim, line endings included.
pub fn set_dependency(text: &str, entry: &DependencyEntry) -> String {
    let canonical = entry.manifest_line();
    let mut out = String::with_capacity(text.len() + canonical.len() + 2);

    let mut in_section = false;
    let mut seen_section = false;
    let mut added = false;
    let mut updated = false;

    for chunk in text.split_inclusive('\n') {
        let (body, eol) = split_line_ending(chunk);
        let line = trim_horizontal(body);

        if line == DEPENDENCIES_HEADER {
            in_section = true;
            seen_section = true;
            out.push_str(chunk);
            continue;
        }

        if in_section && is_section_header(line) {
            if !added && !updated {
                out.push_str(&canonical);
                out.push_str(if eol.is_empty() { "\n" } else { eol });
                added = true;
            }
            in_section = false;
            out.push_str(chunk);
            continue;
        }

        if in_section && entry_key(line) == Some(entry.name.as_str()) {
            out.push_str(&canonical);
            out.push_str(eol);
            updated = true;
            continue;
        }

        out.push_str(chunk);
    }

    if !added && !updated {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if !seen_section {
            out.push('\n');
            out.push_str(DEPENDENCIES_HEADER);
            out.push('\n');
        }
        out.push_str(&canonical);
        out.push('\n');
    }

    out
}

/// Loads and saves the raw manifest text of one project.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ManifestStore { path: path.into() }
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole manifest.
    pub fn load(&self) -> Result<String, ManifestError> {
        std::fs::read_to_string(&self.path).map_err(|source| ManifestError::Unreadable {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the manifest atomically.
    pub fn save(&self, text: &str) -> Result<()> {
        fs::write_atomic(&self.path, text)?;
        tracing::debug!("wrote {}", self.path.display());
        Ok(())
    }
}

/// `[package]` fields the build needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    package: Option<RawPackage>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPackage {
    name: Option<String>,
    version: Option<String>,
}

impl PackageMetadata {
    /// Read `[package]` from manifest text.
    ///
    /// Falls back to `fallback_name` and the default version when the text is
    /// not valid TOML or the fields are missing.
    pub fn from_manifest(text: &str, fallback_name: &str) -> Self {
        let package = match toml::from_str::<RawManifest>(text) {
            Ok(raw) => raw.package.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "could not read [package] from {}: {}; using directory name",
                    MANIFEST_NAME,
                    e.message()
                );
                RawPackage::default()
            }
        };

        PackageMetadata {
            name: package.name.unwrap_or_else(|| fallback_name.to_string()),
            version: package
                .version
                .unwrap_or_else(|| DEFAULT_PACKAGE_VERSION.to_string()),
        }
    }
}

/// Generate the manifest for a new package.
pub fn generate_manifest(name: &str) -> String {
    format!(
        r#"[package]
name = "{name}"
version = "{DEFAULT_PACKAGE_VERSION}"
authors = ["Your Name <your.email@example.com>"]
edition = "2021"

{DEPENDENCIES_HEADER}
"#
    )
}
