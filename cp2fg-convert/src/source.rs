//! Check Point object model and collection loading.
//!
//! The management export is a JSON document holding either a bare list of
//! objects or an object with an `objects` list. Every element is read on its own:
//! an element that is not an object record is logged and counted as unreadable,
//! it never fails the whole load. Fields that a conversion needs are kept as
//! optional strings; deciding whether an object is convertible is left to
//! [`crate::convert`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::kind_map::KindMap;

/// Supported Check Point object categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    Host,
    Network,
    AddressRange,
    ServiceTcp,
    ServiceUdp,
    Group,
    /// Any type without a conversion.
    #[default]
    Other,
}

impl ObjectKind {
    pub fn is_group(self) -> bool {
        self == Self::Group
    }
}

/// A group member reference: a bare uid, or an inline object as produced by
/// detailed exports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Uid(String),
    Inline { uid: Option<String> },
}

impl MemberRef {
    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Uid(uid) => Some(uid),
            Self::Inline { uid } => uid.as_deref(),
        }
    }
}

/// One Check Point object after kind resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceObject {
    pub kind: ObjectKind,
    /// Raw `type` value as exported.
    pub type_name: Option<String>,
    /// Check Point `uid`; used only for group membership.
    pub identifier: Option<String>,
    pub name: Option<String>,
    /// `comments` field, carried into the output when non-empty.
    pub comment: Option<String>,
    pub ipv4_address: Option<String>,
    pub subnet: Option<String>,
    pub mask_length: Option<String>,
    pub first_address: Option<String>,
    pub last_address: Option<String>,
    pub port: Option<String>,
    pub members: Vec<MemberRef>,
}

impl SourceObject {
    fn from_raw(raw: RawObject, kinds: &KindMap) -> Self {
        let kind = raw
            .type_name
            .as_deref()
            .map_or(ObjectKind::Other, |t| kinds.kind_of(t));
        Self {
            kind,
            type_name: raw.type_name,
            identifier: raw.uid,
            name: raw.name,
            comment: raw.comments,
            ipv4_address: raw.ipv4_address,
            subnet: raw.subnet4,
            mask_length: raw.mask_length4.map(String::from),
            first_address: raw.ipv4_address_first,
            last_address: raw.ipv4_address_last,
            port: raw.port.map(String::from),
            members: raw.members.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawObject {
    #[serde(rename = "type")]
    type_name: Option<String>,
    uid: Option<String>,
    name: Option<String>,
    comments: Option<String>,
    ipv4_address: Option<String>,
    subnet4: Option<String>,
    mask_length4: Option<Scalar>,
    ipv4_address_first: Option<String>,
    ipv4_address_last: Option<String>,
    port: Option<Scalar>,
    members: Option<Vec<MemberRef>>,
}

/// Ports and mask lengths show up both as strings and as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

/// Objects read from one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedObjects {
    pub objects: Vec<SourceObject>,
    /// Elements that could not be read as object records.
    pub unreadable: usize,
}

impl LoadedObjects {
    /// Number of elements seen in the export.
    pub fn total(&self) -> usize {
        self.objects.len() + self.unreadable
    }
}

/// Errors returned when reading an export file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} is not a valid JSON file: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Read and decode a JSON file.
pub fn read_collection(path: &Path) -> Result<Value, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Extract source objects from a decoded export.
pub fn load_objects(data: &Value, kinds: &KindMap) -> LoadedObjects {
    let items: &[Value] = match data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("objects") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                warn!("input object has no `objects` list");
                &[]
            }
        },
        _ => {
            warn!("input is neither a list of objects nor an object with an `objects` list");
            &[]
        }
    };
    if items.is_empty() {
        warn!("no objects found in the input");
    }

    let mut loaded = LoadedObjects::default();
    for (idx, item) in items.iter().enumerate() {
        match RawObject::deserialize(item) {
            Ok(raw) => loaded.objects.push(SourceObject::from_raw(raw, kinds)),
            Err(err) => {
                warn!("skipping unreadable object #{idx}: {err}");
                loaded.unreadable += 1;
            }
        }
    }
    loaded
}
