//! Check Point object → FortiGate block conversion.
//!
//! One function per supported kind. Each either renders a complete
//! `config ... end` block, reports the object as already present in the existing
//! script, or reports it as skipped. None of these outcomes is an error.
//!
//! ## Duplicate rules
//!
//! - host, network, address-range: same name **and** equal address facts.
//! - service-tcp, service-udp, group: same name only.
//!
//! ## Block layout
//!
//! Type line first, then address/port/member lines, then `set protocol` for
//! services, then the comment. Names and comments are quoted verbatim, with no
//! escaping of embedded quotes.

use fortiscript_core::{ConfigBlock, EditEntry, Token};

use crate::descriptor::TargetDescriptor;
use crate::existing::ExistingIndex;
use crate::groups::{resolve_members, IdentifierIndex};
use crate::source::{ObjectKind, SourceObject};

pub const ADDRESS_PATH: &str = "firewall address";
pub const ADDRGRP_PATH: &str = "firewall addrgrp";
pub const SERVICE_PATH: &str = "firewall service custom";
pub const SERVICE_PROTOCOL: &str = "TCP/UDP/SCTP";

/// Outcome of converting one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Rendered block, without trailing newline.
    Converted(String),
    /// Already present in the existing script.
    Duplicate,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A required field is missing or empty.
    Unconvertible,
    /// The object's kind has no conversion.
    UnsupportedKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Udp,
}

impl Transport {
    fn portrange_key(self) -> &'static str {
        match self {
            Self::Tcp => "tcp-portrange",
            Self::Udp => "udp-portrange",
        }
    }
}

/// Dispatch on the object's kind. Groups are resolved against `ids` first.
pub fn convert_object(
    object: &SourceObject,
    existing: &ExistingIndex,
    ids: &IdentifierIndex,
) -> Conversion {
    match object.kind {
        ObjectKind::Host => convert_host(object, existing),
        ObjectKind::Network => convert_network(object, existing),
        ObjectKind::AddressRange => convert_range(object, existing),
        ObjectKind::ServiceTcp => convert_service(object, Transport::Tcp, existing),
        ObjectKind::ServiceUdp => convert_service(object, Transport::Udp, existing),
        ObjectKind::Group => convert_group(object, &resolve_members(object, ids), existing),
        ObjectKind::Other => Conversion::Skipped(SkipReason::UnsupportedKind),
    }
}

/// Host → `/32` ipmask address.
pub fn convert_host(object: &SourceObject, existing: &ExistingIndex) -> Conversion {
    let (Some(name), Some(address)) = (present(&object.name), present(&object.ipv4_address))
    else {
        return Conversion::Skipped(SkipReason::Unconvertible);
    };
    let subnet = format!("{address}/32");
    finish_address(object, name, TargetDescriptor::ipmask(&subnet), existing, |entry| {
        entry
            .set("type", vec![Token::bare("ipmask")])
            .set("subnet", vec![Token::bare(&subnet)])
    })
}

/// Network → ipmask address. A mask length of `0` is valid.
pub fn convert_network(object: &SourceObject, existing: &ExistingIndex) -> Conversion {
    let (Some(name), Some(network), Some(mask_length)) = (
        present(&object.name),
        present(&object.subnet),
        present(&object.mask_length),
    ) else {
        return Conversion::Skipped(SkipReason::Unconvertible);
    };
    let subnet = format!("{network}/{mask_length}");
    finish_address(object, name, TargetDescriptor::ipmask(&subnet), existing, |entry| {
        entry
            .set("type", vec![Token::bare("ipmask")])
            .set("subnet", vec![Token::bare(&subnet)])
    })
}

/// Address range → iprange address.
pub fn convert_range(object: &SourceObject, existing: &ExistingIndex) -> Conversion {
    let (Some(name), Some(first), Some(last)) = (
        present(&object.name),
        present(&object.first_address),
        present(&object.last_address),
    ) else {
        return Conversion::Skipped(SkipReason::Unconvertible);
    };
    finish_address(object, name, TargetDescriptor::iprange(first, last), existing, |entry| {
        entry
            .set("type", vec![Token::bare("iprange")])
            .set("start-ip", vec![Token::bare(first)])
            .set("end-ip", vec![Token::bare(last)])
    })
}

/// TCP/UDP service → custom service. The port expression passes through as-is.
pub fn convert_service(
    object: &SourceObject,
    transport: Transport,
    existing: &ExistingIndex,
) -> Conversion {
    let (Some(name), Some(port)) = (present(&object.name), present(&object.port)) else {
        return Conversion::Skipped(SkipReason::Unconvertible);
    };
    if existing.contains(name) {
        return Conversion::Duplicate;
    }
    let entry = EditEntry::new(name)
        .set(transport.portrange_key(), vec![Token::bare(port)])
        .set("protocol", vec![Token::bare(SERVICE_PROTOCOL)]);
    Conversion::Converted(render(SERVICE_PATH, entry, object))
}

/// Group → address group with already-resolved member names.
///
/// The group needs a non-empty member list in the source; if none of the members
/// resolved, the block is still emitted, without a `set member` line.
pub fn convert_group(
    object: &SourceObject,
    members: &[String],
    existing: &ExistingIndex,
) -> Conversion {
    let Some(name) = present(&object.name) else {
        return Conversion::Skipped(SkipReason::Unconvertible);
    };
    if object.members.is_empty() {
        return Conversion::Skipped(SkipReason::Unconvertible);
    }
    if existing.contains(name) {
        return Conversion::Duplicate;
    }
    let mut entry = EditEntry::new(name);
    if !members.is_empty() {
        entry = entry.set(
            "member",
            members.iter().map(|m| Token::quoted(m.as_str())).collect(),
        );
    }
    Conversion::Converted(render(ADDRGRP_PATH, entry, object))
}

fn finish_address(
    object: &SourceObject,
    name: &str,
    descriptor: TargetDescriptor,
    existing: &ExistingIndex,
    settings: impl FnOnce(EditEntry) -> EditEntry,
) -> Conversion {
    if existing.matches(name, &descriptor) {
        return Conversion::Duplicate;
    }
    let entry = settings(EditEntry::new(name));
    Conversion::Converted(render(ADDRESS_PATH, entry, object))
}

fn render(path: &str, entry: EditEntry, object: &SourceObject) -> String {
    let entry = match present(&object.comment) {
        Some(comment) => entry.set("comment", vec![Token::quoted(comment)]),
        None => entry,
    };
    ConfigBlock::new(path).with_entry(entry).to_string()
}

/// Treat empty strings like absent fields.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use fortiscript_core::scan_sections;
    use pretty_assertions::assert_eq;

    use super::{convert_group, convert_object, Conversion, SkipReason};
    use crate::existing::ExistingIndex;
    use crate::groups::IdentifierIndex;
    use crate::source::{MemberRef, ObjectKind, SourceObject};

    fn host(name: &str, address: &str) -> SourceObject {
        SourceObject {
            kind: ObjectKind::Host,
            name: Some(name.to_string()),
            ipv4_address: Some(address.to_string()),
            ..SourceObject::default()
        }
    }

    fn convert(object: &SourceObject, existing: &ExistingIndex) -> Conversion {
        convert_object(object, existing, &IdentifierIndex::default())
    }

    fn block(conversion: Conversion) -> String {
        match conversion {
            Conversion::Converted(block) => block,
            other => panic!("expected converted block, got {other:?}"),
        }
    }

    #[test]
    fn host_becomes_slash_32_address() {
        let out = block(convert(&host("H1", "10.0.0.1"), &ExistingIndex::default()));
        assert_eq!(
            out,
            "config firewall address\n    edit \"H1\"\n        set type ipmask\n        set subnet 10.0.0.1/32\n    next\nend"
        );
    }

    #[test]
    fn host_with_same_facts_is_duplicate() {
        let existing = ExistingIndex::from_script(
            "edit \"H1\"\n    set type ipmask\n    set subnet 10.0.0.1/32\nnext\n",
        );
        assert_eq!(convert(&host("H1", "10.0.0.1"), &existing), Conversion::Duplicate);
    }

    #[test]
    fn host_with_different_facts_is_converted() {
        let existing = ExistingIndex::from_script(
            "edit \"H1\"\n    set type ipmask\n    set subnet 10.0.0.2/32\nnext\n",
        );
        assert!(matches!(
            convert(&host("H1", "10.0.0.1"), &existing),
            Conversion::Converted(_)
        ));
    }

    #[test]
    fn network_with_zero_mask_and_comment() {
        let network = SourceObject {
            kind: ObjectKind::Network,
            name: Some("any-v4".to_string()),
            subnet: Some("0.0.0.0".to_string()),
            mask_length: Some("0".to_string()),
            comment: Some("whole \"v4\" space".to_string()),
            ..SourceObject::default()
        };
        let out = block(convert(&network, &ExistingIndex::default()));
        assert_eq!(
            out,
            "config firewall address\n    edit \"any-v4\"\n        set type ipmask\n        set subnet 0.0.0.0/0\n        set comment \"whole \"v4\" space\"\n    next\nend"
        );
    }

    #[test]
    fn range_becomes_iprange_and_dedupes_on_both_ends() {
        let range = SourceObject {
            kind: ObjectKind::AddressRange,
            name: Some("pool".to_string()),
            first_address: Some("10.0.0.10".to_string()),
            last_address: Some("10.0.0.20".to_string()),
            ..SourceObject::default()
        };
        let out = block(convert(&range, &ExistingIndex::default()));
        let sections = scan_sections(&out);
        let entry = sections.iter().find(|s| s.name == "pool").expect("entry");
        assert_eq!(entry.settings[0].first(), Some("iprange"));
        assert_eq!(entry.get("start-ip").and_then(|s| s.first()), Some("10.0.0.10"));
        assert_eq!(entry.get("end-ip").and_then(|s| s.first()), Some("10.0.0.20"));

        let existing = ExistingIndex::from_script(&out);
        assert_eq!(convert(&range, &existing), Conversion::Duplicate);
    }

    #[test]
    fn services_render_portrange_then_protocol() {
        let udp = SourceObject {
            kind: ObjectKind::ServiceUdp,
            name: Some("syslog".to_string()),
            port: Some("514".to_string()),
            ..SourceObject::default()
        };
        assert_eq!(
            block(convert(&udp, &ExistingIndex::default())),
            "config firewall service custom\n    edit \"syslog\"\n        set udp-portrange 514\n        set protocol TCP/UDP/SCTP\n    next\nend"
        );

        let tcp = SourceObject {
            kind: ObjectKind::ServiceTcp,
            port: Some("1024-65535".to_string()),
            ..udp
        };
        assert!(block(convert(&tcp, &ExistingIndex::default()))
            .contains("        set tcp-portrange 1024-65535\n"));
    }

    #[test]
    fn service_duplicate_is_name_only() {
        let existing = ExistingIndex::from_script(
            "edit \"syslog\"\n    set tcp-portrange 9999\nnext\n",
        );
        let udp = SourceObject {
            kind: ObjectKind::ServiceUdp,
            name: Some("syslog".to_string()),
            port: Some("514".to_string()),
            ..SourceObject::default()
        };
        assert_eq!(convert(&udp, &existing), Conversion::Duplicate);
    }

    #[test]
    fn missing_or_empty_required_fields_are_unconvertible() {
        let cases = vec![
            SourceObject {
                kind: ObjectKind::Host,
                ipv4_address: Some("10.0.0.1".to_string()),
                ..SourceObject::default()
            },
            host("", "10.0.0.1"),
            host("H1", ""),
            SourceObject {
                kind: ObjectKind::Network,
                name: Some("n".to_string()),
                subnet: Some("10.0.0.0".to_string()),
                ..SourceObject::default()
            },
            SourceObject {
                kind: ObjectKind::AddressRange,
                name: Some("r".to_string()),
                first_address: Some("10.0.0.1".to_string()),
                ..SourceObject::default()
            },
            SourceObject {
                kind: ObjectKind::ServiceTcp,
                name: Some("s".to_string()),
                ..SourceObject::default()
            },
            SourceObject {
                kind: ObjectKind::Group,
                name: Some("g".to_string()),
                ..SourceObject::default()
            },
        ];
        for object in cases {
            assert_eq!(
                convert(&object, &ExistingIndex::default()),
                Conversion::Skipped(SkipReason::Unconvertible),
                "{object:?}"
            );
        }
    }

    #[test]
    fn unconvertible_wins_over_duplicate() {
        let existing = ExistingIndex::from_script("edit \"s\"\nnext\n");
        let service = SourceObject {
            kind: ObjectKind::ServiceTcp,
            name: Some("s".to_string()),
            ..SourceObject::default()
        };
        assert_eq!(
            convert(&service, &existing),
            Conversion::Skipped(SkipReason::Unconvertible)
        );
    }

    #[test]
    fn other_kind_is_unsupported() {
        let object = SourceObject {
            kind: ObjectKind::Other,
            name: Some("x".to_string()),
            ..SourceObject::default()
        };
        assert_eq!(
            convert(&object, &ExistingIndex::default()),
            Conversion::Skipped(SkipReason::UnsupportedKind)
        );
    }

    #[test]
    fn group_lists_members_and_omits_empty_member_line() {
        let group = SourceObject {
            kind: ObjectKind::Group,
            name: Some("G1".to_string()),
            members: vec![MemberRef::Uid("u1".to_string())],
            comment: Some("team".to_string()),
            ..SourceObject::default()
        };
        let existing = ExistingIndex::default();

        assert_eq!(
            block(convert_group(&group, &["A".to_string(), "B C".to_string()], &existing)),
            "config firewall addrgrp\n    edit \"G1\"\n        set member \"A\" \"B C\"\n        set comment \"team\"\n    next\nend"
        );
        assert_eq!(
            block(convert_group(&group, &[], &existing)),
            "config firewall addrgrp\n    edit \"G1\"\n        set comment \"team\"\n    next\nend"
        );
    }

    #[test]
    fn group_duplicate_ignores_membership() {
        let existing =
            ExistingIndex::from_script("edit \"G1\"\n    set member \"Z\"\nnext\n");
        let group = SourceObject {
            kind: ObjectKind::Group,
            name: Some("G1".to_string()),
            members: vec![MemberRef::Uid("u1".to_string())],
            ..SourceObject::default()
        };
        assert_eq!(
            convert_group(&group, &["A".to_string()], &existing),
            Conversion::Duplicate
        );
    }
}
