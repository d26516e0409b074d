//! Generic FortiGate CLI script primitives used by higher-level tools.

pub mod lexer;
pub mod parser;
pub mod sections;
pub mod tree;
pub mod writer;

pub use lexer::{tokenize, LexError};
pub use parser::{classify, Line};
pub use sections::{scan_sections, Section, SectionDefect, SkippedLine};
pub use tree::{ConfigBlock, EditEntry, SetLine, Token};
pub use writer::{render_script, write_file, WriteError};
