//! Lenient, per-entry scanning of FortiGate scripts.
//!
//! [`scan_sections`] walks a script line by line and yields one [`Section`] per
//! `edit "<name>"` it finds, closed by the first following `next`. Each section is
//! read in isolation: a structural defect (an `edit` or `end` before `next`, end
//! of input) is recorded on that section only and scanning carries on with the
//! next one. A line inside an entry that cannot be tokenized is set aside in
//! [`Section::skipped`]; the entry's other settings are kept. Nested
//! `config ... end` blocks inside an entry are skipped so their own `edit`/`next`
//! lines do not split the outer entry.

use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::{classify, Line};
use crate::tree::SetLine;

/// Why a section was not closed properly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionDefect {
    #[error("line {line}: `{keyword}` before `next`")]
    Interrupted { line: usize, keyword: &'static str },
    #[error("script ended before `next`")]
    Unterminated,
}

/// A line inside a section that could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {source}")]
pub struct SkippedLine {
    pub line: usize,
    pub source: LexError,
}

/// One scanned `edit ... next` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// 1-based line of the `edit` statement.
    pub line: usize,
    pub settings: Vec<SetLine>,
    /// Lines left out of `settings` because they could not be tokenized.
    pub skipped: Vec<SkippedLine>,
    /// First structural defect seen while reading the entry, if any.
    pub defect: Option<SectionDefect>,
}

impl Section {
    fn new(name: String, line: usize) -> Self {
        Self {
            name,
            line,
            settings: Vec::new(),
            skipped: Vec::new(),
            defect: None,
        }
    }

    fn mark(&mut self, defect: SectionDefect) {
        if self.defect.is_none() {
            self.defect = Some(defect);
        }
    }

    /// Return the last `set` line for `key`.
    pub fn get(&self, key: &str) -> Option<&SetLine> {
        self.settings.iter().rev().find(|s| s.key == key)
    }

    /// Closed by `next`. Skipped lines do not count against this.
    pub fn is_complete(&self) -> bool {
        self.defect.is_none()
    }
}

/// Scan every `edit ... next` section in `text`.
///
/// Never fails. Lines that cannot be tokenized outside of any open section are
/// ignored, so an `edit` line with an unclosed quote produces no section at all.
pub fn scan_sections(text: &str) -> Vec<Section> {
    let mut out = Vec::new();
    let mut open: Option<Section> = None;
    let mut nested = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = match classify(raw) {
            Ok(line) => line,
            Err(source) => {
                if nested == 0 {
                    if let Some(section) = open.as_mut() {
                        section.skipped.push(SkippedLine {
                            line: line_no,
                            source,
                        });
                    }
                }
                continue;
            }
        };

        if nested > 0 {
            match line {
                Line::Config(_) => nested += 1,
                Line::End => nested -= 1,
                _ => {}
            }
            continue;
        }

        match line {
            Line::Edit(name) => {
                if let Some(mut previous) = open.take() {
                    previous.mark(SectionDefect::Interrupted {
                        line: line_no,
                        keyword: "edit",
                    });
                    out.push(previous);
                }
                open = Some(Section::new(name, line_no));
            }
            Line::Set(set) => {
                if let Some(section) = open.as_mut() {
                    section.settings.push(set);
                }
            }
            Line::Next => {
                if let Some(section) = open.take() {
                    out.push(section);
                }
            }
            Line::End => {
                if let Some(mut section) = open.take() {
                    section.mark(SectionDefect::Interrupted {
                        line: line_no,
                        keyword: "end",
                    });
                    out.push(section);
                }
            }
            Line::Config(_) => {
                if open.is_some() {
                    nested = 1;
                }
            }
            Line::Blank | Line::Comment(_) | Line::Unset(_) | Line::Other(_) => {}
        }
    }

    if let Some(mut section) = open {
        section.mark(SectionDefect::Unterminated);
        out.push(section);
    }
    out
}
