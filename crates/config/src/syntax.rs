//! Line-oriented reader for the `key = value` declaration format.
//!
//! Each logical line holds one assignment in one of three shapes:
//!
//! ```text
//! css_dir = "stylesheets"
//! add_import_path "../sass"
//! add_import_path("../vendor")
//! ```
//!
//! Values are double-quoted strings, single-quoted strings, `:symbols`, or bare words such as
//! `true`. `#` starts a comment when it is outside a string.

use crate::ErrorKind;
use crate::LoadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    Str(String),
    Symbol(String),
    Bare(String),
}

impl Value {
    /// The text of the value, regardless of how it was quoted.
    pub(crate) fn text(&self) -> &str {
        match self {
            Self::Str(s) | Self::Symbol(s) | Self::Bare(s) => s,
        }
    }

    /// The value as it was written, for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Str(s) => quote(s),
            Self::Symbol(s) => format!(":{s}"),
            Self::Bare(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement<'s> {
    pub(crate) line: usize,
    pub(crate) key: &'s str,
    pub(crate) value: Value,
}

pub(crate) fn parse(content: &str) -> Result<Vec<Statement<'_>>, LoadError> {
    let mut statements = Vec::new();
    for (idx, text) in content.lines().enumerate() {
        if let Some(statement) = parse_line(idx + 1, text)? {
            statements.push(statement);
        }
    }
    Ok(statements)
}

/// Render `s` as a double-quoted string literal that [`parse`] reads back unchanged.
pub(crate) fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn parse_line(line: usize, text: &str) -> Result<Option<Statement<'_>>, LoadError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut cursor = Cursor::new(text, line);
    let key = cursor.take_while(is_ident_char);
    if key.is_empty() || key.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(cursor.error(format!("expected an option name, found `{text}`")));
    }

    let spaced = cursor.skip_space();
    let parenthesized = match cursor.peek() {
        Some('=') => {
            cursor.bump();
            cursor.skip_space();
            false
        }
        Some('(') => {
            cursor.bump();
            cursor.skip_space();
            true
        }
        Some('#') | None => {
            return Err(cursor.error("missing value").with_key(key));
        }
        Some(_) if spaced => false,
        Some(c) => {
            return Err(cursor
                .error(format!("unexpected `{c}` after option name"))
                .with_key(key));
        }
    };

    let value = parse_value(&mut cursor).map_err(|e| e.with_key(key))?;

    cursor.skip_space();
    if parenthesized {
        if cursor.peek() != Some(')') {
            return Err(cursor.error("expected `)`").with_key(key));
        }
        cursor.bump();
        cursor.skip_space();
    }
    match cursor.peek() {
        None | Some('#') => {}
        Some(_) => {
            return Err(cursor
                .error(format!("unexpected `{}` after value", cursor.rest()))
                .with_key(key));
        }
    }

    Ok(Some(Statement { line, key, value }))
}

fn parse_value(cursor: &mut Cursor<'_>) -> Result<Value, LoadError> {
    match cursor.peek() {
        Some('"') => {
            cursor.bump();
            parse_double_quoted(cursor).map(Value::Str)
        }
        Some('\'') => {
            cursor.bump();
            parse_single_quoted(cursor).map(Value::Str)
        }
        Some(':') => {
            cursor.bump();
            let name = cursor.take_while(is_ident_char);
            if name.is_empty() {
                return Err(cursor.error("expected a symbol name after `:`"));
            }
            Ok(Value::Symbol(name.to_owned()))
        }
        Some(c) if is_bare_char(c) => Ok(Value::Bare(cursor.take_while(is_bare_char).to_owned())),
        Some('#') | None => Err(cursor.error("missing value")),
        Some(c) => Err(cursor.error(format!("unexpected `{c}` where a value was expected"))),
    }
}

fn parse_double_quoted(cursor: &mut Cursor<'_>) -> Result<String, LoadError> {
    let mut value = String::new();
    loop {
        match cursor.bump() {
            Some('"') => return Ok(value),
            Some('\\') => match cursor.bump() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(c) => value.push(c),
                None => break,
            },
            Some(c) => value.push(c),
            None => break,
        }
    }
    Err(cursor.error("unterminated string"))
}

fn parse_single_quoted(cursor: &mut Cursor<'_>) -> Result<String, LoadError> {
    let mut value = String::new();
    loop {
        match cursor.bump() {
            Some('\'') => return Ok(value),
            Some('\\') => match cursor.bump() {
                Some(c @ ('\'' | '\\')) => value.push(c),
                Some(c) => {
                    value.push('\\');
                    value.push(c);
                }
                None => break,
            },
            Some(c) => value.push(c),
            None => break,
        }
    }
    Err(cursor.error("unterminated string"))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-' | '+')
}

struct Cursor<'s> {
    text: &'s str,
    pos: usize,
    line: usize,
}

impl<'s> Cursor<'s> {
    fn new(text: &'s str, line: usize) -> Self {
        Self { text, pos: 0, line }
    }

    fn rest(&self) -> &'s str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Returns whether any whitespace was consumed.
    fn skip_space(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
        self.pos != start
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    fn error(&self, message: impl Into<String>) -> LoadError {
        LoadError::new(ErrorKind::Syntax, self.line, message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn single(text: &str) -> Statement<'_> {
        let mut statements = parse(text).unwrap();
        assert_eq!(statements.len(), 1, "{statements:?}");
        statements.remove(0)
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let statements = parse("\n# css_dir = \"x\"\n   \n\t# indented comment\n").unwrap();
        assert!(statements.is_empty());
    }

    #[test]
    fn assignment_forms() {
        let assign = single("css_dir = \"stylesheets\"");
        assert_eq!(assign.key, "css_dir");
        assert_eq!(assign.value, Value::Str("stylesheets".to_owned()));

        let tight = single("css_dir=\"stylesheets\"");
        assert_eq!(tight.value, Value::Str("stylesheets".to_owned()));

        let directive = single("add_import_path \"../sass\"");
        assert_eq!(directive.key, "add_import_path");
        assert_eq!(directive.value, Value::Str("../sass".to_owned()));

        let call = single("add_import_path( '../vendor' )");
        assert_eq!(call.value, Value::Str("../vendor".to_owned()));
    }

    #[test]
    fn value_shapes() {
        assert_eq!(
            single("output_style = :compact").value,
            Value::Symbol("compact".to_owned())
        );
        assert_eq!(
            single("relative_assets = true").value,
            Value::Bare("true".to_owned())
        );
    }

    #[test]
    fn trailing_comment_is_ignored() {
        let statement = single("sass_dir = \"src\" # where sources live");
        assert_eq!(statement.value, Value::Str("src".to_owned()));
    }

    #[test]
    fn hash_inside_string_is_kept() {
        let statement = single("http_path = \"/a#b\"");
        assert_eq!(statement.value, Value::Str("/a#b".to_owned()));
    }

    #[test]
    fn escapes() {
        let statement = single(r#"http_path = "a\"b\\c\td""#);
        assert_eq!(statement.value, Value::Str("a\"b\\c\td".to_owned()));

        let statement = single(r"http_path = 'it\'s \n'");
        assert_eq!(statement.value, Value::Str("it's \\n".to_owned()));
    }

    #[test]
    fn line_numbers_are_one_based() {
        let statements = parse("# header\n\nsass_dir = \"src\"\n").unwrap();
        assert_eq!(statements[0].line, 3);
    }

    #[test]
    fn quote_reads_back() {
        let original = "we\"ird\\pa\tth\n";
        let line = format!("http_path = {}", quote(original));
        assert_eq!(single(&line).value, Value::Str(original.to_owned()));
    }

    #[test]
    fn unterminated_string() {
        let err = parse("sass_dir = \"src").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.key(), Some("sass_dir"));
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn missing_value() {
        let err = parse("\nsass_dir =").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.line(), 2);

        let err = parse("sass_dir").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn trailing_garbage() {
        let err = parse("sass_dir = \"src\" \"more\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn unclosed_call() {
        let err = parse("add_import_path(\"../sass\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.key(), Some("add_import_path"));
    }

    #[test]
    fn bad_option_name() {
        let err = parse("= \"src\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.key(), None);
    }
}
