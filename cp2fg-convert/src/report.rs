use colored::Colorize;

use crate::conversion_summary::{self, ConversionSummary};
use crate::descriptor::{DescriptorKind, TargetDescriptor};
use crate::existing::ExistingIndex;

/// Render summary counts for terminal output.
pub fn render_summary(summary: ConversionSummary) -> String {
    conversion_summary::render(summary).cyan().to_string()
}

/// Render one line per indexed entry followed by a count line.
pub fn render_index(index: &ExistingIndex) -> String {
    let mut out = Vec::with_capacity(index.len() + 1);
    for (name, descriptor) in index.iter() {
        let line = index_line(name, descriptor);
        let colored = match descriptor.kind {
            DescriptorKind::Ipmask | DescriptorKind::Iprange => line.green().to_string(),
            DescriptorKind::Unknown => line.yellow().to_string(),
        };
        out.push(colored);
    }
    out.push(
        format!(
            "index entries={} unknown={}",
            index.len(),
            index.unknown_count()
        )
        .cyan()
        .to_string(),
    );
    out.join("\n")
}

fn index_line(name: &str, descriptor: &TargetDescriptor) -> String {
    let mut line = format!("\"{name}\" kind={}", descriptor.kind.as_str());
    for (fact, value) in &descriptor.facts {
        line.push_str(&format!(" {fact}={value}"));
    }
    line
}
