use crate::lexer::{tokenize, LexError};
use crate::tree::{SetLine, Token};

/// A classified script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    /// `#...` line such as `#config-version=...`.
    Comment(String),
    /// `config <path...>`; path tokens joined by single spaces.
    Config(String),
    Edit(String),
    Set(SetLine),
    Unset(String),
    Next,
    End,
    /// Anything else (`append`, `select`, stray words).
    Other(Vec<Token>),
}

/// Tokenize and classify one line.
///
/// `edit` lines are read without tokenizing when the name is quoted: the name
/// is everything between the first and the last `"`, so names holding quotes
/// survive the trip through [`crate::render_script`].
pub fn classify(raw: &str) -> Result<Line, LexError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        return Ok(Line::Comment(rest.trim().to_string()));
    }
    if let Some(name) = quoted_edit_name(trimmed) {
        return Ok(Line::Edit(name.to_string()));
    }

    let mut tokens = tokenize(trimmed)?;
    let keyword = match tokens.first() {
        Some(Token::Bare(word)) => word.clone(),
        _ => return Ok(Line::Other(tokens)),
    };

    let line = match (keyword.as_str(), tokens.len()) {
        ("config", n) if n >= 2 => Line::Config(
            tokens[1..]
                .iter()
                .map(Token::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        ("edit", 2) => Line::Edit(tokens[1].as_str().to_string()),
        ("set", n) if n >= 2 => {
            let values = tokens.split_off(2);
            Line::Set(SetLine::new(tokens[1].as_str(), values))
        }
        ("unset", 2) => Line::Unset(tokens[1].as_str().to_string()),
        ("next", 1) => Line::Next,
        ("end", 1) => Line::End,
        _ => Line::Other(tokens),
    };
    Ok(line)
}

/// `edit "<name>"` → `<name>`, taken verbatim between the outer quotes.
fn quoted_edit_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("edit")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let inner = rest.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner)
}
