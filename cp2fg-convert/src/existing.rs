//! Index of objects already defined in a previously generated FortiGate script.
//!
//! The script is scanned entry by entry with [`fortiscript_core::scan_sections`],
//! and each `edit "<name>" ... next` entry is reduced to a [`TargetDescriptor`]:
//!
//! - `set type ipmask` + `set subnet` → `ipmask` with a `subnet` fact. FortiGate
//!   prints subnets as `<addr> <netmask>`; those are normalized to `<addr>/<len>`.
//! - `set type iprange` + `set start-ip` + `set end-ip` → `iprange` with `start`
//!   and `end` facts.
//! - Anything else (services, groups, other address types, entries without a
//!   closing `next`) → `unknown` with no facts. The name is still indexed, which
//!   is enough for name-only duplicate checks.
//!
//! Names and comments are written without escaping, so a comment holding `"`
//! does not tokenize. Such lines are skipped on their own; the entry keeps the
//! facts from its other lines.
//!
//! Matching is by name across two independently produced files, so it is a
//! best-effort heuristic, not an identity check.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::Path;

use fortiscript_core::{scan_sections, Section, Token};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::descriptor::{DescriptorKind, TargetDescriptor};

/// Errors returned when reading an existing script.
#[derive(Debug, Error)]
pub enum IndexLoadError {
    #[error("failed to read existing configuration {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Name → descriptor for every entry of an existing script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExistingIndex {
    entries: BTreeMap<String, TargetDescriptor>,
}

impl ExistingIndex {
    /// Build the index from script text. Later entries with the same name win.
    pub fn from_script(text: &str) -> Self {
        let entries = scan_sections(text)
            .iter()
            .map(|section| (section.name.clone(), describe_section(section)))
            .collect();
        Self { entries }
    }

    /// Read and index a script; a missing file is an error.
    pub fn read(path: &Path) -> Result<Self, IndexLoadError> {
        let bytes = fs::read(path).map_err(|source| IndexLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_script(&String::from_utf8_lossy(&bytes)))
    }

    /// Like [`ExistingIndex::read`], but a missing file yields an empty index.
    pub fn load(path: &Path) -> Result<Self, IndexLoadError> {
        match Self::read(path) {
            Err(IndexLoadError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                warn!(
                    "existing configuration {} not found; treating as empty",
                    path.display()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TargetDescriptor> {
        self.entries.get(name)
    }

    /// Whether any entry has this name, whatever its kind.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether an entry has this name and exactly these facts.
    pub fn matches(&self, name: &str, candidate: &TargetDescriptor) -> bool {
        self.get(name) == Some(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetDescriptor)> {
        self.entries.iter().map(|(name, desc)| (name.as_str(), desc))
    }

    /// Number of entries indexed as `unknown`.
    pub fn unknown_count(&self) -> usize {
        self.entries
            .values()
            .filter(|d| d.kind == DescriptorKind::Unknown)
            .count()
    }
}

/// Reduce one scanned entry to its descriptor.
pub fn describe_section(section: &Section) -> TargetDescriptor {
    if let Some(defect) = &section.defect {
        debug!(
            "entry \"{}\" at line {} indexed as unknown: {defect}",
            section.name, section.line
        );
        return TargetDescriptor::unknown();
    }
    for skipped in &section.skipped {
        debug!("entry \"{}\": ignoring {skipped}", section.name);
    }

    let described = match section.get("type").and_then(|s| s.first()) {
        Some("ipmask") => section
            .get("subnet")
            .and_then(|s| normalize_subnet(&s.values))
            .map(TargetDescriptor::ipmask),
        Some("iprange") => {
            let start = section.get("start-ip").and_then(|s| s.first());
            let end = section.get("end-ip").and_then(|s| s.first());
            match (start, end) {
                (Some(start), Some(end)) => Some(TargetDescriptor::iprange(start, end)),
                _ => None,
            }
        }
        _ => None,
    };
    described.unwrap_or_else(TargetDescriptor::unknown)
}

/// `a.b.c.d/len` is kept as written; `a.b.c.d m.m.m.m` becomes `a.b.c.d/len`.
fn normalize_subnet(values: &[Token]) -> Option<String> {
    match values {
        [subnet] => Some(subnet.as_str().to_string()),
        [address, mask] => {
            let prefix = netmask_prefix(mask.as_str())?;
            Some(format!("{}/{prefix}", address.as_str()))
        }
        _ => None,
    }
}

/// Prefix length of a contiguous dotted netmask.
fn netmask_prefix(mask: &str) -> Option<u32> {
    let bits = u32::from(mask.parse::<Ipv4Addr>().ok()?);
    let ones = bits.leading_ones();
    let expected = u32::MAX.checked_shl(32 - ones).unwrap_or(0);
    (bits == expected).then_some(ones)
}
