use serde::Serialize;

use crate::pipeline::ConversionOutcome;
use crate::source::LoadedObjects;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub total: usize,
    pub converted: usize,
    pub duplicates: usize,
    pub unconvertible: usize,
    pub unsupported: usize,
    pub unreadable: usize,
}

pub fn summarize(loaded: &LoadedObjects, outcome: &ConversionOutcome) -> ConversionSummary {
    ConversionSummary {
        total: loaded.total(),
        converted: outcome.blocks.len(),
        duplicates: outcome.duplicates,
        unconvertible: outcome.unconvertible,
        unsupported: outcome.unsupported,
        unreadable: loaded.unreadable,
    }
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "convert_summary total={} converted={} duplicates={} unconvertible={} unsupported={} unreadable={}",
        summary.total,
        summary.converted,
        summary.duplicates,
        summary.unconvertible,
        summary.unsupported,
        summary.unreadable
    )
}
