//! Check Point to FortiGate firewall object conversion.
//!
//! Converts objects exported from Check Point management (JSON) into FortiGate
//! CLI configuration blocks, optionally skipping objects that a previously
//! generated FortiGate script already defines.
//!
//! # Architecture
//!
//! ## Input
//!
//! - [`source`] — Check Point object model and export loading
//! - [`kind_map`] — Check Point `type` → conversion routing (TOML)
//!
//! ## Conversion
//!
//! - [`groups`] — uid → name index and group member resolution
//! - [`convert`] — one conversion per supported kind
//! - [`pipeline`] — whole-collection run: non-groups first, then groups
//!
//! ## Existing configuration
//!
//! - [`existing`] — name → descriptor index of an earlier FortiGate script
//! - [`descriptor`] — the facts compared for duplicate detection
//!
//! ## Reporting
//!
//! - [`conversion_summary`] — run counters
//! - [`report`] — terminal rendering
//!
//! # Examples
//!
//! ```ignore
//! use cp2fg_convert::existing::ExistingIndex;
//! use cp2fg_convert::kind_map::KindMap;
//! use cp2fg_convert::pipeline::run;
//! use cp2fg_convert::source::{load_objects, read_collection};
//!
//! let data = read_collection("objects.json".as_ref())?;
//! let loaded = load_objects(&data, &KindMap::default());
//! let existing = ExistingIndex::load("fortigate.conf".as_ref())?;
//! let outcome = run(&loaded.objects, &existing);
//! fortiscript_core::write_file(&outcome.blocks, "out.conf".as_ref())?;
//! ```
//!
//! # Built on fortiscript-core
//!
//! FortiGate script tokenizing, scanning and rendering live in
//! `fortiscript-core`. Everything Check Point specific is in this crate.

pub mod conversion_summary;
pub mod convert;
pub mod descriptor;
pub mod existing;
pub mod groups;
pub mod kind_map;
pub mod pipeline;
pub mod report;
pub mod source;
