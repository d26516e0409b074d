use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cp2fg-convert"))
}

#[test]
fn convert_without_existing_script_converts_every_supported_object() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.txt");

    cmd()
        .arg("convert")
        .arg(fixture("fixtures/checkpoint-objects.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "convert_summary total=12 converted=10 duplicates=0 unconvertible=1 unsupported=1 unreadable=0",
        ))
        .stdout(predicate::str::contains("FortiGate commands written to"));

    let script = fs::read_to_string(&output).expect("read output");
    assert!(script.contains(
        "config firewall address\n    edit \"web-01\"\n        set type ipmask\n        set subnet 10.10.1.10/32\n        set comment \"primary web server\"\n    next\nend\n\n"
    ));
    assert!(script.contains("set comment \"replica of \"web-01\"\"\n"));
    assert!(script.contains("edit \"syslog\\udp\"\n"));
    assert!(script.contains("set subnet 0.0.0.0/0"));
    assert!(script.contains("set udp-portrange 514"));
    assert!(script.contains("set tcp-portrange 1024-65535"));
    assert!(script.contains(
        "config firewall addrgrp\n    edit \"servers\"\n        set member \"web-01\" \"db-01\"\n        set comment \"all servers\"\n    next\nend"
    ));
    assert!(script.contains("set member \"lan-net\" \"dhcp-pool\""));
    assert!(!script.contains("no-address"));
    assert!(!script.contains("example.com"));
}

#[test]
fn convert_writes_groups_after_all_other_objects() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.txt");

    cmd()
        .arg("convert")
        .arg(fixture("fixtures/checkpoint-objects.json"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let script = fs::read_to_string(&output).expect("read output");
    let names: Vec<&str> = script
        .lines()
        .filter_map(|line| line.trim().strip_prefix("edit "))
        .map(|name| name.trim_matches('"'))
        .collect();
    assert_eq!(
        names,
        vec![
            "web-01",
            "db-01",
            "lan-net",
            "any-v4",
            "dhcp-pool",
            "tcp-8443",
            r"syslog\udp",
            "tcp-high",
            "servers",
            "lan-and-pool",
        ]
    );
}

#[test]
fn convert_skips_objects_already_in_existing_script() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.txt");

    cmd()
        .arg("convert")
        .arg(fixture("fixtures/checkpoint-objects.json"))
        .arg("--existing")
        .arg(fixture("fixtures/fortigate-existing.conf"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "convert_summary total=12 converted=6 duplicates=4 unconvertible=1 unsupported=1 unreadable=0",
        ));

    let script = fs::read_to_string(&output).expect("read output");
    for skipped in ["web-01", "lan-net", "tcp-8443", "servers"] {
        assert!(
            !script.contains(&format!("edit \"{skipped}\"")),
            "{skipped} should be a duplicate"
        );
    }
    // Range differs from the existing entry, so it is re-emitted.
    assert!(script.contains("set end-ip 10.10.5.250"));
    assert!(script.contains("edit \"lan-and-pool\""));
}

#[test]
fn convert_treats_missing_existing_script_as_empty() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.txt");

    cmd()
        .arg("convert")
        .arg(fixture("fixtures/checkpoint-objects.json"))
        .arg("--existing")
        .arg(dir.path().join("nope.conf"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("converted=10 duplicates=0"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn convert_fails_on_invalid_json() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("objects.json");
    let output = dir.path().join("out.txt");
    fs::write(&input, "{ \"objects\": [").expect("write input");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load objects from"));
    assert!(!output.exists());
}

#[test]
fn convert_accepts_bare_array_and_empty_collection() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("objects.json");
    let output = dir.path().join("out.txt");
    fs::write(&input, "[]").expect("write input");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("total=0 converted=0"));
    assert_eq!(fs::read_to_string(&output).expect("read output"), "");
}

#[test]
fn convert_refuses_to_overwrite_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("objects.json");
    let original = r#"[{"type":"host","name":"h","ipv4-address":"10.0.0.1"}]"#;
    fs::write(&input, original).expect("write input");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite input file"));
    assert_eq!(fs::read_to_string(&input).expect("read input"), original);
}

#[test]
fn convert_routes_aliased_types_through_kinds_file() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("objects.json");
    let kinds = dir.path().join("kinds.toml");
    let output = dir.path().join("out.txt");
    fs::write(
        &input,
        r#"[
            {"uid": "a", "type": "checkpoint-host", "name": "mgmt", "ipv4-address": "192.0.2.1"},
            {"uid": "b", "type": "simple-gateway", "name": "gw", "ipv4-address": "192.0.2.254"}
        ]"#,
    )
    .expect("write input");
    fs::write(
        &kinds,
        r#"
[[kind]]
source = "checkpoint-host"
target = "host"
"#,
    )
    .expect("write kinds");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--kinds-file")
        .arg(&kinds)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("converted=1"))
        .stdout(predicate::str::contains("unsupported=1"));

    let script = fs::read_to_string(&output).expect("read output");
    assert!(script.contains("edit \"mgmt\""));
    assert!(script.contains("set subnet 192.0.2.1/32"));
}

#[test]
fn convert_fails_on_malformed_kinds_file() {
    let dir = tempdir().expect("tempdir");
    let kinds = dir.path().join("kinds.toml");
    fs::write(&kinds, "[[kind]]\nsource = \"x\"\ntarget = \"router\"\n").expect("write kinds");

    cmd()
        .arg("convert")
        .arg(fixture("fixtures/checkpoint-objects.json"))
        .arg("--kinds-file")
        .arg(&kinds)
        .arg("--output")
        .arg(dir.path().join("out.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse kind mappings file"));
}

#[test]
fn convert_json_format_reports_counts_and_output_path() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.txt");

    let assert = cmd()
        .arg("convert")
        .arg(fixture("fixtures/checkpoint-objects.json"))
        .arg("--existing")
        .arg(fixture("fixtures/fortigate-existing.conf"))
        .arg("--output")
        .arg(&output)
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json stdout");
    assert_eq!(json["total"], 12);
    assert_eq!(json["converted"], 6);
    assert_eq!(json["duplicates"], 4);
    assert_eq!(json["unconvertible"], 1);
    assert_eq!(json["unsupported"], 1);
    assert_eq!(json["unreadable"], 0);
    assert_eq!(json["output"], output.display().to_string());
}
