//! Dependency specifications and the parsed dependency mapping.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::core::catalog::DependencyCatalog;

/// Name → version mapping read from the `[dependencies]` section.
///
/// A `BTreeMap` keeps iteration order stable so that generated descriptors
/// are byte-identical for identical manifests.
pub type DependencyMapping = BTreeMap<String, String>;

/// Errors raised while interpreting a dependency request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DependencyError {
    #[error(
        "no default version available for `{name}`\n\
         \n\
         help: specify a version with `sail add {name}@<version>`"
    )]
    UnrecognizedDependency { name: String },

    #[error("invalid dependency `{spec}`: {reason}")]
    InvalidSpec { spec: String, reason: String },
}

/// A single resolved dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub name: String,
    pub version: String,
}

impl DependencyEntry {
    /// The canonical manifest line for this entry, without a line terminator.
    pub fn manifest_line(&self) -> String {
        format!("{} = \"{}\"", self.name, self.version)
    }
}

impl fmt::Display for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// A dependency as requested on the command line: `name` or `name@version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: String,
    pub version: Option<String>,
}

impl DependencySpec {
    /// Parse `name[@version]`, splitting at the first `@`.
    pub fn parse(spec: &str) -> Result<Self, DependencyError> {
        let invalid = |reason: &str| DependencyError::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (name, version) = match spec.split_once('@') {
            Some((name, version)) => (name, Some(version)),
            None => (spec, None),
        };

        if name.is_empty() {
            return Err(invalid("dependency name is empty"));
        }
        if name
            .chars()
            .any(|c| c == '=' || c == '"' || c.is_whitespace())
        {
            return Err(invalid(
                "dependency name must not contain `=`, `\"` or whitespace",
            ));
        }

        let version = match version {
            None => None,
            Some("") => return Err(invalid("version after `@` is empty")),
            Some(v) if v.chars().any(|c| c == '"' || c.is_whitespace()) => {
                return Err(invalid("version must not contain `\"` or whitespace"))
            }
            Some(v) => Some(v.to_string()),
        };

        Ok(DependencySpec {
            name: name.to_string(),
            version,
        })
    }

    /// Pick the version to record: explicit first, then the catalog default.
    ///
    /// Fails when neither is available; callers must not touch the manifest
    /// in that case.
    pub fn resolve(&self, catalog: &DependencyCatalog) -> Result<DependencyEntry, DependencyError> {
        let version = match &self.version {
            Some(version) => version.clone(),
            None => catalog
                .default_version(&self.name)
                .map(str::to_string)
                .ok_or_else(|| DependencyError::UnrecognizedDependency {
                    name: self.name.clone(),
                })?,
        };

        Ok(DependencyEntry {
            name: self.name.clone(),
            version,
        })
    }
}

impl std::str::FromStr for DependencySpec {
    type Err = DependencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencySpec::parse(s)
    }
}
