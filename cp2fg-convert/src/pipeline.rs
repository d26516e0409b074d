//! Conversion of a whole object collection.
//!
//! The identifier index is built from the full collection before anything is
//! converted. Non-group objects are converted first and groups second, each in
//! input order, so every group block follows the address blocks it refers to.

use tracing::debug;

use crate::convert::{convert_object, Conversion, SkipReason};
use crate::existing::ExistingIndex;
use crate::groups::IdentifierIndex;
use crate::source::SourceObject;

/// Accumulated result of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOutcome {
    /// Rendered blocks in output order.
    pub blocks: Vec<String>,
    /// Objects already present in the existing script.
    pub duplicates: usize,
    /// Objects missing a required field.
    pub unconvertible: usize,
    /// Objects of a kind without a conversion.
    pub unsupported: usize,
}

impl ConversionOutcome {
    fn record(&mut self, object: &SourceObject, conversion: Conversion) {
        let name = object.name.as_deref().unwrap_or("<unnamed>");
        match conversion {
            Conversion::Converted(block) => self.blocks.push(block),
            Conversion::Duplicate => {
                debug!("\"{name}\" already present in existing configuration");
                self.duplicates += 1;
            }
            Conversion::Skipped(SkipReason::Unconvertible) => {
                debug!("\"{name}\" ({:?}) is missing a required field", object.kind);
                self.unconvertible += 1;
            }
            Conversion::Skipped(SkipReason::UnsupportedKind) => {
                debug!(
                    "\"{name}\" has unsupported type {}",
                    object.type_name.as_deref().unwrap_or("<none>")
                );
                self.unsupported += 1;
            }
        }
    }
}

/// Convert `objects`, skipping what `existing` already defines.
pub fn run(objects: &[SourceObject], existing: &ExistingIndex) -> ConversionOutcome {
    let ids = IdentifierIndex::build(objects);
    let (groups, others): (Vec<&SourceObject>, Vec<&SourceObject>) =
        objects.iter().partition(|obj| obj.kind.is_group());

    let mut outcome = ConversionOutcome::default();
    for object in others.into_iter().chain(groups) {
        outcome.record(object, convert_object(object, existing, &ids));
    }
    outcome
}
