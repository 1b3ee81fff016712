use std::fmt;

/// Category of a configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub enum ErrorKind {
    /// The key is not a recognized option.
    UnknownOption,
    /// `output_style` is outside the fixed literal set.
    InvalidEnumValue,
    /// The value is not a bare `true`/`false` token.
    InvalidBooleanValue,
    /// A declared directory cannot be turned into a path.
    PathResolutionError,
    /// The line is malformed or the value has the wrong shape.
    Syntax,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownOption => "unknown option",
            Self::InvalidEnumValue => "invalid enum value",
            Self::InvalidBooleanValue => "invalid boolean value",
            Self::PathResolutionError => "path resolution error",
            Self::Syntax => "syntax error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to load a configuration, pointing at the offending line.
///
/// `line` is 1-based; `0` means the failure is not tied to a line (e.g. the root directory could
/// not be made absolute).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.render())]
pub struct LoadError {
    kind: ErrorKind,
    line: usize,
    key: Option<String>,
    message: String,
}

impl LoadError {
    pub(crate) fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            key: None,
            message: message.into(),
        }
    }

    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn render(&self) -> String {
        let mut rendered = String::new();
        if self.line != 0 {
            rendered.push_str(&format!("line {}: ", self.line));
        }
        rendered.push_str(self.kind.as_str());
        if let Some(key) = &self.key {
            rendered.push_str(&format!(" for `{key}`"));
        }
        rendered.push_str(": ");
        rendered.push_str(&self.message);
        rendered
    }
}
