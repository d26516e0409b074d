use anyhow::{Context, Result};
use cp2fg_convert::existing::ExistingIndex;
use cp2fg_convert::report::render_index;

use crate::cli::{IndexArgs, OutputFormat};

pub fn run_index(args: IndexArgs) -> Result<()> {
    let index = ExistingIndex::read(&args.file)
        .with_context(|| format!("failed to index {}", args.file.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", render_index(&index)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&index)?),
    }
    Ok(())
}
