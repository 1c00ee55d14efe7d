//! Build manifests: the on-disk description of projects and their units
//!
//! A manifest lists every project of a build together with the units it
//! publishes. TOML, YAML and JSON documents share one schema; the format is
//! picked from the file extension.

use crate::metadata::{
    Capability, Filter, Project, Requirement, Unit, VersionError, VersionRange, parse_version,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Manifest loading errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("YAML parsing error in {path}: {reason}")]
    Yaml { path: PathBuf, reason: String },

    #[error("JSON parsing error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported manifest format: {path} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Unit {unit}: {source}")]
    InvalidVersion {
        unit: String,
        #[source]
        source: VersionError,
    },
}

/// Serialization format of a manifest document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Top-level manifest document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildManifest {
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSpec {
    pub key: String,

    #[serde(default, rename = "unit")]
    pub units: Vec<UnitSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSpec {
    pub id: String,
    pub version: String,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub provides: Vec<CapabilitySpec>,

    #[serde(default)]
    pub requires: Vec<RequirementSpec>,

    #[serde(default)]
    pub meta_requires: Vec<RequirementSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilitySpec {
    pub namespace: String,
    pub name: String,

    /// Defaults to the owning unit's version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementSpec {
    pub namespace: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,

    #[serde(default = "default_greedy")]
    pub greedy: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterSpec>,
}

fn default_greedy() -> bool {
    true
}

/// Attribute equality filter, `(key=value)`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub key: String,
    pub value: String,
}

/// Read and parse a manifest, choosing the format from its extension
pub fn load_manifest(path: impl AsRef<Path>) -> Result<BuildManifest, ManifestError> {
    let path = path.as_ref();
    let format = ManifestFormat::from_path(path).ok_or_else(|| ManifestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = BuildManifest::parse(&content, format, path)?;
    debug!(
        path = %path.display(),
        projects = manifest.projects.len(),
        "Loaded build manifest"
    );
    Ok(manifest)
}

impl BuildManifest {
    /// Parse a manifest document; `origin` only labels errors
    pub fn parse(
        content: &str,
        format: ManifestFormat,
        origin: &Path,
    ) -> Result<Self, ManifestError> {
        let path = origin.to_path_buf();
        match format {
            ManifestFormat::Toml => {
                toml::from_str(content).map_err(|source| ManifestError::Toml { path, source })
            }
            ManifestFormat::Yaml => serde_saphyr::from_str(content).map_err(|e| {
                ManifestError::Yaml {
                    path,
                    reason: e.to_string(),
                }
            }),
            ManifestFormat::Json => {
                serde_json::from_str(content).map_err(|source| ManifestError::Json { path, source })
            }
        }
    }

    /// Convert into the project/unit pairs the closure graph is built from
    pub fn into_projects(self) -> Result<Vec<(Project, Vec<Arc<Unit>>)>, ManifestError> {
        self.projects
            .into_iter()
            .map(|project| {
                let units = project
                    .units
                    .into_iter()
                    .map(UnitSpec::into_unit)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((Project::new(project.key), units))
            })
            .collect()
    }
}

impl UnitSpec {
    pub fn into_unit(self) -> Result<Arc<Unit>, ManifestError> {
        let invalid = |source: VersionError| ManifestError::InvalidVersion {
            unit: self.id.clone(),
            source,
        };

        let version = parse_version(&self.version).map_err(invalid)?;
        let mut builder = Unit::builder(self.id.clone(), version.clone());

        for (key, value) in &self.properties {
            builder = builder.property(key, value);
        }
        for capability in &self.provides {
            let cap_version = match &capability.version {
                Some(raw) => parse_version(raw).map_err(invalid)?,
                None => version.clone(),
            };
            let mut cap = Capability::new(&capability.namespace, &capability.name, cap_version);
            for (key, value) in &capability.attributes {
                cap = cap.with_attribute(key, value);
            }
            builder = builder.provides(cap);
        }
        for requirement in &self.requires {
            builder = builder.requires(requirement.to_requirement().map_err(invalid)?);
        }
        for requirement in &self.meta_requires {
            builder = builder.meta_requires(requirement.to_requirement().map_err(invalid)?);
        }

        Ok(builder.build())
    }
}

impl RequirementSpec {
    pub fn to_requirement(&self) -> Result<Requirement, VersionError> {
        let mut requirement = Requirement::new(&self.namespace, &self.name);
        if let Some(range) = &self.range {
            requirement = requirement.with_range(range.parse::<VersionRange>()?);
        }
        if let Some(filter) = &self.filter {
            requirement = requirement.with_filter(Filter::attribute_equals(&filter.key, &filter.value));
        }
        if self.optional {
            requirement = requirement.optional();
        }
        if let Some(max) = self.max {
            requirement = requirement.with_max(max);
        }
        if !self.greedy {
            requirement = requirement.non_greedy();
        }
        Ok(requirement)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
