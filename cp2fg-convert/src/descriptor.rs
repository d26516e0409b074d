use std::collections::BTreeMap;

use serde::Serialize;

/// FortiGate address type as far as duplicate detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    Ipmask,
    Iprange,
    Unknown,
}

impl DescriptorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ipmask => "ipmask",
            Self::Iprange => "iprange",
            Self::Unknown => "unknown",
        }
    }
}

/// Minimal facts about a named object, compared by equality only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDescriptor {
    pub kind: DescriptorKind,
    pub facts: BTreeMap<String, String>,
}

impl TargetDescriptor {
    pub fn ipmask(subnet: impl Into<String>) -> Self {
        Self {
            kind: DescriptorKind::Ipmask,
            facts: BTreeMap::from([("subnet".to_string(), subnet.into())]),
        }
    }

    pub fn iprange(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            kind: DescriptorKind::Iprange,
            facts: BTreeMap::from([
                ("start".to_string(), start.into()),
                ("end".to_string(), end.into()),
            ]),
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: DescriptorKind::Unknown,
            facts: BTreeMap::new(),
        }
    }

    pub fn fact(&self, name: &str) -> Option<&str> {
        self.facts.get(name).map(String::as_str)
    }
}
