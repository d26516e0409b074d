use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cp2fg-convert")]
#[command(about = "Convert Check Point object exports into FortiGate CLI configuration")]
pub struct Cli {
    /// Log progress (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert a Check Point object export into a FortiGate script.
    Convert(ConvertArgs),
    /// List the objects an existing FortiGate script defines.
    Index(IndexArgs),
    /// Pretty-print a JSON file and save the formatted copy.
    PrintJson(PrintJsonArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Check Point objects export (JSON).
    pub input: PathBuf,
    /// Output script path.
    #[arg(short, long, default_value = "checkpoint-to-fortigate.txt")]
    pub output: PathBuf,
    /// Previously generated FortiGate script; objects it already defines are skipped.
    #[arg(long)]
    pub existing: Option<PathBuf>,
    /// Extra kind mappings TOML, applied on top of the embedded table.
    #[arg(long)]
    pub kinds_file: Option<PathBuf>,
    /// Summary format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// FortiGate script to index.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct PrintJsonArgs {
    /// JSON file to format.
    pub input: PathBuf,
    /// Where to save the formatted copy. Defaults to `<input stem>_formatted.json`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
