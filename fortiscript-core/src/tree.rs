use std::fmt::{self, Display, Formatter};

/// A single value on a script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unquoted word such as `ipmask` or `10.0.0.0/24`.
    Bare(String),
    /// Double-quoted value. Written back verbatim between quotes.
    Quoted(String),
}

impl Token {
    pub fn bare(text: impl Into<String>) -> Self {
        Self::Bare(text.into())
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self::Quoted(text.into())
    }

    /// Token text without surrounding quotes.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bare(text) | Self::Quoted(text) => text,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(text) => write!(f, "{text}"),
            Self::Quoted(text) => write!(f, "\"{text}\""),
        }
    }
}

/// A `set <key> <values...>` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLine {
    pub key: String,
    pub values: Vec<Token>,
}

impl SetLine {
    pub fn new(key: impl Into<String>, values: Vec<Token>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// Text of the first value, if any.
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(Token::as_str)
    }
}

impl Display for SetLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "set {}", self.key)?;
        for value in &self.values {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

/// One `edit "<name>" ... next` entry inside a config block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEntry {
    pub name: String,
    pub settings: Vec<SetLine>,
}

impl EditEntry {
    /// Create an entry with no settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Vec::new(),
        }
    }

    /// Append a `set` line and return the entry, for chained construction.
    pub fn set(mut self, key: impl Into<String>, values: Vec<Token>) -> Self {
        self.settings.push(SetLine::new(key, values));
        self
    }
}

/// A `config <path> ... end` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBlock {
    /// Space-joined config path, for example `firewall service custom`.
    pub path: String,
    pub entries: Vec<EditEntry>,
}

impl ConfigBlock {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: EditEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

impl Display for ConfigBlock {
    /// Render with the fixed 4/8-space layout. No trailing newline after `end`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "config {}", self.path)?;
        for entry in &self.entries {
            writeln!(f, "    edit \"{}\"", entry.name)?;
            for setting in &entry.settings {
                writeln!(f, "        {setting}")?;
            }
            writeln!(f, "    next")?;
        }
        write!(f, "end")
    }
}
