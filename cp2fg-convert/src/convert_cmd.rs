//! `convert` subcommand.
//!
//! 1. Refuse an output path that would overwrite the export or existing script
//! 2. Build the kind table (embedded mappings, then `--kinds-file` on top)
//! 3. Load the export; an unreadable or non-JSON file is fatal
//! 4. Index the existing script; a missing one counts as empty
//! 5. Run the pipeline, write the script, print the summary

use std::path::Path;

use anyhow::{Context, Result};
use cp2fg_convert::conversion_summary::{summarize, ConversionSummary};
use cp2fg_convert::existing::ExistingIndex;
use cp2fg_convert::kind_map::{default_kind_mappings, load_kind_mappings, KindMap};
use cp2fg_convert::pipeline;
use cp2fg_convert::report::render_summary;
use cp2fg_convert::source::{load_objects, read_collection};
use fortiscript_core::write_file;
use serde::Serialize;
use tracing::info;

use crate::cli::{ConvertArgs, OutputFormat};
use crate::path_guard::ensure_output_not_same;

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    let mut inputs = vec![args.input.as_path()];
    if let Some(path) = &args.existing {
        inputs.push(path.as_path());
    }
    ensure_output_not_same(&args.output, &inputs)?;

    let kinds = resolve_kinds(args.kinds_file.as_deref())?;

    let data = read_collection(&args.input)
        .with_context(|| format!("failed to load objects from {}", args.input.display()))?;
    let loaded = load_objects(&data, &kinds);
    info!(
        "loaded {} objects from {}",
        loaded.total(),
        args.input.display()
    );

    let existing = match &args.existing {
        Some(path) => {
            let index = ExistingIndex::load(path)
                .with_context(|| format!("failed to index {}", path.display()))?;
            info!("indexed {} existing entries from {}", index.len(), path.display());
            index
        }
        None => ExistingIndex::default(),
    };

    let outcome = pipeline::run(&loaded.objects, &existing);

    write_file(&outcome.blocks, &args.output)
        .with_context(|| format!("failed to write output script {}", args.output.display()))?;

    let summary = summarize(&loaded, &outcome);
    match args.format {
        OutputFormat::Text => {
            println!("{}", render_summary(summary));
            println!(
                "converted {} Check Point objects to FortiGate format",
                summary.converted
            );
            println!("FortiGate commands written to {}", args.output.display());
        }
        OutputFormat::Json => {
            let report = ConvertReport {
                output: args.output.display().to_string(),
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn resolve_kinds(path: Option<&Path>) -> Result<KindMap> {
    let mut mappings = default_kind_mappings();
    if let Some(path) = path {
        let extra = load_kind_mappings(path)?;
        info!("applying {} kind mappings from {}", extra.len(), path.display());
        mappings.extend(extra);
    }
    Ok(KindMap::from_mappings(&mappings))
}

#[derive(Debug, Serialize)]
struct ConvertReport {
    output: String,
    #[serde(flatten)]
    summary: ConversionSummary,
}
