//! Field splitting for a single specification line.

use toktab_core::ascii::{BACKSLASH, DOUBLE_QUOTE};

/// One field of a specification line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field text; for quoted fields the quotes are removed and escapes resolved.
    pub text: String,
    /// Whether the field started with a double quote.
    pub quoted: bool,
}

impl Field {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            quoted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// A quoted field has no closing quote. Carries the fields read so far.
    Unterminated(Vec<Field>),
}

/// Split `line` on `separator` into trimmed, non-empty fields.
///
/// A field that starts with `"` runs to the matching closing quote, so the
/// separator may appear inside a spelling. Within quotes `\"`, `\\`, `\t`
/// and `\n` are escapes; any other backslash is kept literally.
pub fn split_fields(line: &str, separator: char) -> Result<Vec<Field>, SplitError> {
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start_matches(|c: char| c == separator || c.is_whitespace());
        if rest.is_empty() {
            return Ok(fields);
        }

        if let Some(quoted) = rest.strip_prefix(DOUBLE_QUOTE) {
            match read_quoted(quoted) {
                Some((text, consumed)) => {
                    fields.push(Field { text, quoted: true });
                    rest = &quoted[consumed..];
                    // Text glued to the closing quote is dropped up to the next separator.
                    let end = rest.find(separator).unwrap_or(rest.len());
                    rest = &rest[end..];
                }
                None => return Err(SplitError::Unterminated(fields)),
            }
        } else {
            let end = rest.find(separator).unwrap_or(rest.len());
            let text = rest[..end].trim();
            if !text.is_empty() {
                fields.push(Field::plain(text));
            }
            rest = &rest[end..];
        }
    }
}

/// Read up to the closing quote. Returns the unescaped text and the number of
/// bytes consumed including the closing quote.
fn read_quoted(input: &str) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            DOUBLE_QUOTE => return Some((text, i + 1)),
            BACKSLASH => match chars.next() {
                Some((_, '"')) => text.push('"'),
                Some((_, '\\')) => text.push('\\'),
                Some((_, 't')) => text.push('\t'),
                Some((_, 'n')) => text.push('\n'),
                Some((_, other)) => {
                    text.push(BACKSLASH);
                    text.push(other);
                }
                None => return None,
            },
            c => text.push(c),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str, sep: char) -> Vec<String> {
        split_fields(line, sep)
            .unwrap()
            .into_iter()
            .map(|f| f.text)
            .collect()
    }

    #[test]
    fn test_tab_separated() {
        assert_eq!(texts("LBRACE\t\"{\"", '\t'), vec!["LBRACE", "{"]);
        assert_eq!(texts("IDENT", '\t'), vec!["IDENT"]);
        assert_eq!(texts("ARROW\t\t \"->\"  ", '\t'), vec!["ARROW", "->"]);
    }

    #[test]
    fn test_space_separated_keeps_quoted_space() {
        let fields = split_fields("WS \" \"", ' ').unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].text, " ");
        assert!(fields[1].quoted);
    }

    #[test]
    fn test_comma_inside_quotes() {
        assert_eq!(texts("COMMA,\",\"", ','), vec!["COMMA", ","]);
        assert_eq!(texts("SEMI, \";\"", ','), vec!["SEMI", ";"]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(texts(r#"QUOTE "\"""#, ' '), vec!["QUOTE", "\""]);
        assert_eq!(texts(r#"BSLASH "\\""#, ' '), vec!["BSLASH", "\\"]);
        assert_eq!(texts(r#"ODD "\q""#, ' '), vec!["ODD", "\\q"]);
    }

    #[test]
    fn test_empty_quotes_is_a_field() {
        let fields = split_fields("SPACE\t\"\"", '\t').unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].text, "");
    }

    #[test]
    fn test_separators_only() {
        assert!(split_fields(",, ,", ',').unwrap().is_empty());
    }

    #[test]
    fn test_unterminated() {
        match split_fields("BAD\t\"abc", '\t') {
            Err(SplitError::Unterminated(fields)) => assert_eq!(fields, vec![Field::plain("BAD")]),
            other => panic!("expected unterminated, got {:?}", other),
        }
    }
}
