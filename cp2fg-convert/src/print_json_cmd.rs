use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cp2fg_convert::source::read_collection;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::cli::PrintJsonArgs;
use crate::path_guard::ensure_output_not_same;

pub fn run_print_json(args: PrintJsonArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| formatted_path(&args.input));
    ensure_output_not_same(&output, &[args.input.as_path()])?;

    let data = read_collection(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let pretty = to_pretty_json(&data)?;

    println!("{pretty}");
    fs::write(&output, &pretty)
        .with_context(|| format!("failed to write formatted JSON {}", output.display()))?;
    eprintln!("formatted JSON saved to {}", output.display());
    Ok(())
}

/// Serialize with 4-space indentation, keeping key order.
fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).context("formatted JSON is not UTF-8")
}

/// `dir/name.ext` → `dir/name_formatted.json`.
fn formatted_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    input.with_file_name(format!("{stem}_formatted.json"))
}
