use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::source::ObjectKind;

/// Routes one Check Point `type` value to a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KindMapping {
    pub source: String,
    pub target: ObjectKind,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    kind: Vec<KindMapping>,
}

/// Errors returned when loading kind mapping files.
#[derive(Debug, Error)]
pub enum MappingLoadError {
    #[error("failed to read kind mappings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse kind mappings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Lookup table from `type` value to [`ObjectKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMap {
    by_type: BTreeMap<String, ObjectKind>,
}

impl KindMap {
    /// Build a table; a later mapping for the same `source` replaces an earlier one.
    pub fn from_mappings(mappings: &[KindMapping]) -> Self {
        let by_type = mappings
            .iter()
            .map(|m| (m.source.clone(), m.target))
            .collect();
        Self { by_type }
    }

    /// Kind for a `type` value; unmapped values are [`ObjectKind::Other`].
    pub fn kind_of(&self, type_name: &str) -> ObjectKind {
        self.by_type
            .get(type_name)
            .copied()
            .unwrap_or(ObjectKind::Other)
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl Default for KindMap {
    fn default() -> Self {
        Self::from_mappings(&default_kind_mappings())
    }
}

/// Load kind mappings from a TOML file.
pub fn load_kind_mappings(path: &Path) -> Result<Vec<KindMapping>, MappingLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| MappingLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_mappings(&raw, path.display().to_string())
}

/// Built-in mappings: each supported Check Point type to itself.
pub fn default_kind_mappings() -> Vec<KindMapping> {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/mappings/kinds.toml"));
    match parse_mappings(embedded, "embedded kind mappings".to_string()) {
        Ok(mappings) if !mappings.is_empty() => mappings,
        _ => fallback_kind_mappings(),
    }
}

fn parse_mappings(raw: &str, path: String) -> Result<Vec<KindMapping>, MappingLoadError> {
    let parsed: MappingFile =
        toml::from_str(raw).map_err(|source| MappingLoadError::Parse { path, source })?;
    Ok(parsed.kind)
}

fn fallback_kind_mappings() -> Vec<KindMapping> {
    [
        ("host", ObjectKind::Host),
        ("network", ObjectKind::Network),
        ("address-range", ObjectKind::AddressRange),
        ("service-tcp", ObjectKind::ServiceTcp),
        ("service-udp", ObjectKind::ServiceUdp),
        ("group", ObjectKind::Group),
    ]
    .into_iter()
    .map(|(source, target)| KindMapping {
        source: source.to_string(),
        target,
        note: "built-in".to_string(),
    })
    .collect()
}
