use thiserror::Error;

use crate::tree::Token;

/// Errors produced while splitting a line into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A double quote was opened but never closed on the same line.
    #[error("unterminated quoted value starting at column {column}")]
    UnterminatedQuote { column: usize },
    /// A closing quote was glued to more text, e.g. `"a"b`.
    #[error("unexpected '{found}' after closing quote at column {column}")]
    TrailingAfterQuote { found: char, column: usize },
}

/// Split one script line into tokens.
///
/// Whitespace separates tokens. Double-quoted values may contain spaces and are
/// taken verbatim up to the next `"`; backslashes have no special meaning, the
/// same way [`crate::Token`] writes them. A quoted value must be followed by
/// whitespace or end of line. Columns are 1-based byte offsets.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                text.push(c);
            }
            if !closed {
                return Err(LexError::UnterminatedQuote { column: start + 1 });
            }
            if let Some(&(pos, next)) = chars.peek() {
                if !next.is_whitespace() {
                    return Err(LexError::TrailingAfterQuote {
                        found: next,
                        column: pos + 1,
                    });
                }
            }
            tokens.push(Token::Quoted(text));
            continue;
        }

        let mut text = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            chars.next();
        }
        tokens.push(Token::Bare(text));
    }

    Ok(tokens)
}
