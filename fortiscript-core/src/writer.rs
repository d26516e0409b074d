use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while writing a script.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write output file.
    #[error("failed to write script file: {0}")]
    Io(#[from] std::io::Error),
}

/// Join rendered blocks into one script, each followed by a blank line.
pub fn render_script<S: AsRef<str>>(blocks: &[S]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(block.as_ref());
        out.push_str("\n\n");
    }
    out
}

/// Render `blocks` with [`render_script`] and write them to `path`.
pub fn write_file<S: AsRef<str>>(blocks: &[S], path: &Path) -> Result<(), WriteError> {
    fs::write(path, render_script(blocks))?;
    Ok(())
}
