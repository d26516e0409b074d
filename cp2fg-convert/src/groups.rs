use std::collections::BTreeMap;

use tracing::debug;

use crate::source::SourceObject;

/// uid → name for every named object of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierIndex {
    names: BTreeMap<String, String>,
}

impl IdentifierIndex {
    /// Build from the whole collection, regardless of kind. Objects without a
    /// uid or without a name are left out; a repeated uid keeps the last name.
    pub fn build(objects: &[SourceObject]) -> Self {
        let names = objects
            .iter()
            .filter_map(|obj| {
                let uid = obj.identifier.as_deref()?;
                let name = obj.name.as_deref().filter(|n| !n.is_empty())?;
                Some((uid.to_string(), name.to_string()))
            })
            .collect();
        Self { names }
    }

    pub fn name_of(&self, identifier: &str) -> Option<&str> {
        self.names.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolve a group's members to names, in order. Unresolvable members are dropped.
pub fn resolve_members(group: &SourceObject, index: &IdentifierIndex) -> Vec<String> {
    let group_name = group.name.as_deref().unwrap_or("<unnamed>");
    group
        .members
        .iter()
        .filter_map(|member| {
            let resolved = member.uid().and_then(|uid| index.name_of(uid));
            if resolved.is_none() {
                debug!(
                    "group \"{group_name}\": dropping unresolved member {}",
                    member.uid().unwrap_or("<no uid>")
                );
            }
            resolved.map(ToOwned::to_owned)
        })
        .collect()
}
